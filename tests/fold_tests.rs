use anyhow::Result;
use better_find_buffer::buffer::{Region, Snapshot};
use better_find_buffer::commands::{
    FindResultsListener, fold_and_advance, fold_path_prefixes, group_body, toggle_path_prefixes,
};
use better_find_buffer::config::Settings;
use better_find_buffer::error::NavError;
use better_find_buffer::host::HostAdapter;
use better_find_buffer::host::memory::MemoryHost;

use test_helpers::ResultsFixture;

#[test]
fn test_fold_and_advance_moves_to_next_group() -> Result<()> {
    let fixture = ResultsFixture::new()?;
    let mut host = fixture.host();
    let view = host.active_view();
    let settings = Settings::default();

    host.set_caret(view, fixture.offset_in("let needle", "needle"));
    let outcome = fold_and_advance(&mut host, &settings)?;

    let body_begin = fixture.offset_in("    1  fn alpha", "    1");
    let body_end = fixture.offset_in("and needle\n", "\n");
    assert_eq!(outcome.folded, Some(Region::new(body_begin, body_end)));
    assert!(host.is_folded(view, Region::new(body_begin, body_end)));

    let beta = fixture.header_offset(&fixture.beta);
    assert_eq!(outcome.next_file.map(|r| r.begin), Some(beta));

    let needle = fixture.offset_in("10:     needle", "needle");
    assert_eq!(outcome.next_match, Some(Region::new(needle, needle + 6)));
    assert_eq!(host.selection(view), vec![Region::new(needle, needle + 6)]);
    Ok(())
}

#[test]
fn test_fold_last_group_wraps_to_first() -> Result<()> {
    let fixture = ResultsFixture::new()?;
    let mut host = fixture.host();
    let view = host.active_view();

    host.set_caret(view, fixture.offset_in("8: Needle", "Needle"));
    let outcome = fold_and_advance(&mut host, &Settings::default())?;

    let body_begin = fixture.offset_in("    7: needle()", "    7");
    let body_end = fixture.offset_in("8: Needle\n", "\n");
    assert_eq!(outcome.folded, Some(Region::new(body_begin, body_end)));
    assert_eq!(
        outcome.next_file.map(|r| r.begin),
        Some(fixture.header_offset(&fixture.alpha))
    );
    assert_eq!(
        outcome.next_match.map(|r| r.begin),
        Some(fixture.offset_in("let needle", "needle"))
    );
    Ok(())
}

#[test]
fn test_fold_without_cycle_keeps_fold() -> Result<()> {
    let fixture = ResultsFixture::new()?;
    let mut host = fixture.host();
    let view = host.active_view();
    let settings = Settings {
        cycle: false,
        ..Settings::default()
    };

    let caret = fixture.offset_in("7: needle", "needle");
    host.set_caret(view, caret);
    let outcome = fold_and_advance(&mut host, &settings)?;

    assert!(outcome.folded.is_some());
    assert_eq!(outcome.next_file, None);
    assert_eq!(outcome.next_match, None);
    assert_eq!(host.selection(view), vec![Region::point(caret)]);
    Ok(())
}

#[test]
fn test_group_body_at_end_of_buffer() {
    let text = "/src/a.rs:\n  1: one\n\n/src/b.rs:\n  2: two\n  3  three";
    let snapshot = Snapshot::new(text);

    let caret = text.find("two").unwrap();
    let body = group_body(&snapshot, caret).unwrap();
    assert_eq!(&text[body.begin..body.end], "  2: two\n  3  three");

    let caret = text.find("one").unwrap();
    let body = group_body(&snapshot, caret).unwrap();
    assert_eq!(&text[body.begin..body.end], "  1: one");

    assert_eq!(
        group_body(&Snapshot::new("no header here\n"), 3),
        Err(NavError::NotFound("file header"))
    );
}

#[test]
fn test_fold_empty_group_only_advances() -> Result<()> {
    let text = "/src/a.rs:\n\n/src/b.rs:\n  1: x\n";
    let mut host = MemoryHost::with_results(text);
    let view = host.active_view();

    host.set_caret(view, 0);
    let outcome = fold_and_advance(&mut host, &Settings::default())?;

    assert_eq!(outcome.folded, None);
    assert!(host.view(view).unwrap().folds.is_empty());
    assert_eq!(
        outcome.next_file.map(|r| r.begin),
        Some(text.find("/src/b.rs").unwrap())
    );
    // No search line, so no match tags to land on
    assert_eq!(outcome.next_match, None);
    Ok(())
}

#[test]
fn test_fold_before_first_header_is_rejected() -> Result<()> {
    let fixture = ResultsFixture::new()?;
    let mut host = fixture.host();
    let view = host.active_view();

    host.set_caret(view, 0);
    assert_eq!(
        fold_and_advance(&mut host, &Settings::default()),
        Err(NavError::NotFound("file header"))
    );
    assert!(host.view(view).unwrap().folds.is_empty());
    assert_eq!(host.selection(view), vec![Region::point(0)]);
    Ok(())
}

#[test]
fn test_toggle_path_prefixes() -> Result<()> {
    let fixture = ResultsFixture::new()?;
    let mut host = fixture.host();
    let view = host.active_view();
    let settings = Settings::default();

    assert!(toggle_path_prefixes(&mut host, &settings)?);
    let folds = host.view(view).unwrap().folds.clone();
    assert_eq!(folds.len(), 3);

    // Each fold hides the temporary directory, leaving `src/...` or `tests/...`
    let root = format!("{}/", fixture.temp_dir.path().display());
    for fold in &folds {
        assert_eq!(fixture.text_at(fold.begin, fold.end), root);
    }

    // Already folded prefixes are not folded twice
    assert_eq!(fold_path_prefixes(&mut host, &settings)?, 0);

    assert!(!toggle_path_prefixes(&mut host, &settings)?);
    assert!(host.view(view).unwrap().folds.is_empty());
    Ok(())
}

#[test]
fn test_path_prefixes_need_a_shared_directory() {
    let mut host = MemoryHost::with_results("a.rs:\n  1: x\n\nb.rs:\n  1: y\n");
    assert_eq!(
        toggle_path_prefixes(&mut host, &Settings::default()),
        Err(NavError::NoCandidates)
    );
}

#[test]
fn test_listener_toggles_read_only_and_tidies_headers() -> Result<()> {
    let fixture = ResultsFixture::new()?;
    let mut host = fixture.host();
    let results = host.active_view();
    let other = host.add_view(Some("notes.txt"), "plain text");

    let listener = FindResultsListener::new(Settings {
        fold_path_prefix: true,
        ..Settings::default()
    });

    listener.on_activated(&mut host, results);
    assert!(host.is_read_only(results));
    assert_eq!(host.view(results).unwrap().folds.len(), 3);

    // Activating again does not stack folds
    listener.on_activated(&mut host, results);
    assert_eq!(host.view(results).unwrap().folds.len(), 3);

    listener.on_deactivated(&mut host, results);
    assert!(!host.is_read_only(results));

    listener.on_activated(&mut host, other);
    assert!(!host.is_read_only(other));
    Ok(())
}

#[test]
fn test_fold_stops_at_next_header_without_blank_line() -> Result<()> {
    let text = "/a/b.txt:\n12: foo\n34: bar\n/c/d.txt:\n5: baz\n";
    let mut host = MemoryHost::with_results(text);
    let view = host.active_view();

    host.set_caret(view, text.find("34: bar").unwrap());
    let outcome = fold_and_advance(&mut host, &Settings::default())?;

    let folded = outcome.folded.unwrap();
    assert_eq!(&text[folded.begin..folded.end], "12: foo\n34: bar");

    let next = text.find("/c/d.txt").unwrap();
    assert_eq!(outcome.next_file, Some(Region::new(next, next + 8)));
    assert!(!host.is_folded(view, Region::new(next, next + 8)));
    assert!(!host.is_folded(view, Region::point(text.find("5: baz").unwrap())));
    Ok(())
}

#[test]
fn test_group_body_between_adjacent_headers() {
    let text = "/a/b.txt:\n12: foo\n34: bar\n/c/d.txt:\n5: baz\n";
    let snapshot = Snapshot::new(text);

    let body = group_body(&snapshot, 0).unwrap();
    assert_eq!(&text[body.begin..body.end], "12: foo\n34: bar");

    let body = group_body(&snapshot, text.find("baz").unwrap()).unwrap();
    assert_eq!(&text[body.begin..body.end], "5: baz");
}
