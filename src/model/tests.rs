use super::*;

const TWO_GROUPS: &str = "/a/b.txt:\n12: foo\n34: bar\n/c/d.txt:\n5: baz\n";

#[test]
fn test_list_file_headers() {
    let snapshot = Snapshot::new(TWO_GROUPS);
    let headers = list_file_headers(&snapshot);

    assert_eq!(headers.len(), 2);
    assert_eq!(headers[0].path, "/a/b.txt");
    assert_eq!(headers[0].offset, 0);
    assert_eq!(headers[0].region, Region::new(0, 8));
    assert_eq!(headers[1].path, "/c/d.txt");
    assert_eq!(headers[1].offset, 26);
}

#[test]
fn test_header_tolerates_trailing_whitespace() {
    let snapshot = Snapshot::new("/a/b.txt:  \r\n  1: x");
    let headers = list_file_headers(&snapshot);
    assert_eq!(headers.len(), 1);
    assert_eq!(headers[0].path, "/a/b.txt");
}

#[test]
fn test_match_text_ending_in_colon_is_not_a_header() {
    let snapshot = Snapshot::new("/a/b.txt:\n  12: fn main() {:\n   7  label:\n");
    let headers = list_file_headers(&snapshot);
    assert_eq!(headers.len(), 1);

    let matches = list_match_lines(&snapshot);
    assert_eq!(matches.len(), 2);
}

#[test]
fn test_header_starting_with_digits() {
    let snapshot = Snapshot::new("2024-notes.txt:\n  3: x\n");
    let headers = list_file_headers(&snapshot);
    assert_eq!(headers.len(), 1);
    assert_eq!(headers[0].path, "2024-notes.txt");
    assert_eq!(list_match_lines(&snapshot).len(), 1);
}

#[test]
fn test_header_starting_with_digits_and_space() {
    let snapshot = Snapshot::new("2024 notes/a.txt:\n  3: x\n   4  y:\n7: z\n");
    let headers = list_file_headers(&snapshot);

    assert_eq!(headers.len(), 1);
    assert_eq!(headers[0].path, "2024 notes/a.txt");
    assert_eq!(headers[0].region, Region::new(0, 16));

    let numbers: Vec<u64> = list_match_lines(&snapshot).iter().map(|m| m.line_number).collect();
    assert_eq!(numbers, vec![3, 4, 7]);
}

#[test]
fn test_list_match_lines() {
    let snapshot = Snapshot::new("/a/b.txt:\n  11  context\n  12: hit\n  ..\n\n0: zero\n");
    let matches = list_match_lines(&snapshot);

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].line_number, 11);
    assert!(!matches[0].is_hit);
    assert_eq!(matches[0].content_offset, matches[0].offset + 6);
    assert_eq!(matches[1].line_number, 12);
    assert!(matches[1].is_hit);
    assert_eq!(matches[1].content_offset, matches[1].offset + 6);
}

#[test]
fn test_parse_search_line() {
    let snapshot = Snapshot::new(
        "Searching 12 files for \"say \"hi\"\" (case sensitive, whole word, regex)\n",
    );
    let query = parse_search_line(&snapshot.line(0).unwrap()).unwrap();

    assert_eq!(query.term, "say \"hi\"");
    assert!(query.case_sensitive);
    assert!(query.whole_word);
    assert!(query.regex);

    let snapshot = Snapshot::new("Searching 1 file for \"x\"\n");
    let query = parse_search_line(&snapshot.line(0).unwrap()).unwrap();
    assert_eq!(query, SearchQuery { term: "x".to_string(), ..SearchQuery::default() });
}

#[test]
fn test_group_bounds() {
    let snapshot = Snapshot::new(TWO_GROUPS);
    let headers = list_file_headers(&snapshot);
    let bounds = group_bounds(&headers, snapshot.len());

    assert_eq!(bounds, vec![Region::new(0, 26), Region::new(26, snapshot.len())]);

    // Every match line falls in exactly one group
    for m in list_match_lines(&snapshot) {
        let owners = bounds.iter().filter(|b| b.begin <= m.offset && m.offset < b.end).count();
        assert_eq!(owners, 1);
    }
}

#[test]
fn test_filter_to_current_group_excludes_other_groups() {
    let snapshot = Snapshot::new(TWO_GROUPS);
    let headers = file_match_regions(&list_file_headers(&snapshot));
    let matches: Vec<Region> = list_match_lines(&snapshot)
        .iter()
        .map(|m| Region::new(m.content_offset, m.content_offset + 3))
        .collect();

    // Caret inside group 1
    let filtered = filter_to_current_group(12, &matches, &headers, snapshot.len());
    let texts: Vec<&str> = filtered.iter().map(|r| &TWO_GROUPS[r.begin..r.end]).collect();
    assert_eq!(texts, vec!["foo", "bar"]);

    // Caret on the second header
    let filtered = filter_to_current_group(26, &matches, &headers, snapshot.len());
    let texts: Vec<&str> = filtered.iter().map(|r| &TWO_GROUPS[r.begin..r.end]).collect();
    assert_eq!(texts, vec!["baz"]);
}

#[test]
fn test_filter_to_current_group_stays_within_bounds() {
    let snapshot = Snapshot::new(TWO_GROUPS);
    let headers = file_match_regions(&list_file_headers(&snapshot));
    let matches: Vec<Region> = (0..snapshot.len()).map(Region::point).collect();

    for caret in 0..=snapshot.len() {
        let lower = headers.iter().rev().find(|h| h.begin <= caret).map_or(0, |h| h.end);
        let upper = headers.iter().find(|h| h.begin > caret).map_or(snapshot.len(), |h| h.begin);

        for m in filter_to_current_group(caret, &matches, &headers, snapshot.len()) {
            assert!(lower <= m.begin && m.begin <= upper, "caret {caret}: {m:?}");
        }
    }
}

#[test]
fn test_filter_before_first_header() {
    let headers = vec![Region::new(10, 15)];
    let matches = vec![Region::new(0, 2), Region::new(4, 6), Region::new(20, 22)];
    let filtered = filter_to_current_group(3, &matches, &headers, 30);
    assert_eq!(filtered, vec![Region::new(0, 2), Region::new(4, 6)]);
}

#[test]
fn test_path_prefix_regions() {
    let text = "/home/me/proj/src/a.rs:\n1: x\n\n/home/me/proj/tests/b.rs:\n2: y\n";
    let snapshot = Snapshot::new(text);
    let headers = list_file_headers(&snapshot);

    assert_eq!(common_path_prefix(&headers), Some(PathBuf::from("/home/me/proj")));

    let regions = path_prefix_regions(&headers);
    let folded: Vec<&str> = regions.iter().map(|r| &text[r.begin..r.end]).collect();
    assert_eq!(folded, vec!["/home/me/proj/", "/home/me/proj/"]);
}

#[test]
fn test_path_prefix_regions_without_shared_dir() {
    let snapshot = Snapshot::new(TWO_GROUPS);
    assert!(path_prefix_regions(&list_file_headers(&snapshot)).is_empty());
}
