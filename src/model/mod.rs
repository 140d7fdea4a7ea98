//! Whole-buffer model of a Find Results buffer.
//!
//! A results buffer is a run of groups. Each group starts with a header line
//! naming a file (`/path/to/file.rs:`) followed by numbered match lines
//! (`  12: matched text`) and context lines (`  11  nearby text`). Groups are
//! usually separated by a blank line, and each search starts with a
//! `Searching N files for "term"` line.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::buffer::{Line, Region, Snapshot};
use crate::paths::{common_dir_prefix, prefix_len_in};

/// Match-tag derivation for buffers without host-provided tags
pub mod tagging;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S.*?):\s*$").expect("header pattern is valid"));

// A line shaped like a numbered gutter: an indented number followed by a
// separator, or an unindented number followed by a colon. Guards against
// match text that happens to end in a colon. Unindented `2024 notes/a.txt:`
// stays a header.
static GUTTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\s+\d+(?::|\s|$)|\d+(?::|$))").expect("gutter pattern is valid")
});

static MATCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)(.+)$").expect("match pattern is valid"));

static SEARCHING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^Searching\b[^"]*"(.+)"(.*)$"#).expect("query pattern is valid"));

/// A header line naming the file whose matches follow.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// Start of the header line
    pub offset: usize,

    /// The path text, without the trailing colon
    pub path: String,

    /// The span of the path text
    pub region: Region,
}

/// A numbered line inside a group.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MatchLine {
    /// Start of the line
    pub offset: usize,

    /// 1-based line number in the source file
    pub line_number: u64,

    /// True for an actual hit (`12: text`), false for a context line (`11  text`)
    pub is_hit: bool,

    /// Start of the source text after the gutter
    pub content_offset: usize,
}

/// Query parsed from a `Searching N files for "term" (flags)` line.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub term: String,
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub regex: bool,
}

/// Parses `line` as a header. The path is not checked against the disk.
pub fn parse_header_line(line: &Line<'_>) -> Option<FileHeader> {
    if GUTTER_RE.is_match(line.text) {
        return None;
    }

    let path = HEADER_RE.captures(line.text)?.get(1)?;
    Some(FileHeader {
        offset: line.region.begin,
        path: path.as_str().to_string(),
        region: Region::new(line.region.begin, line.region.begin + path.end()),
    })
}

/// Parses `line` as a numbered match or context line.
pub fn parse_match_line(line: &Line<'_>) -> Option<MatchLine> {
    if parse_header_line(line).is_some() {
        return None;
    }

    let captures = MATCH_RE.captures(line.text)?;
    let digits = captures.get(1)?;
    let line_number: u64 = digits.as_str().parse().ok().filter(|n| *n >= 1)?;

    let rest = &line.text[digits.end()..];
    let is_hit = rest.starts_with(':');
    let mut gutter = digits.end();
    if rest.starts_with(':') || rest.starts_with(' ') {
        gutter += 1;
        if line.text[gutter..].starts_with(' ') {
            gutter += 1;
        }
    }

    Some(MatchLine {
        offset: line.region.begin,
        line_number,
        is_hit,
        content_offset: line.region.begin + gutter,
    })
}

/// Parses a `Searching ...` line.
pub fn parse_search_line(line: &Line<'_>) -> Option<SearchQuery> {
    let captures = SEARCHING_RE.captures(line.text)?;
    let term = captures.get(1)?.as_str().to_string();
    let flags = captures.get(2).map_or("", |m| m.as_str());

    Some(SearchQuery {
        term,
        case_sensitive: flags.contains("case sensitive"),
        whole_word: flags.contains("whole word"),
        regex: flags.contains("regex"),
    })
}

/// Collects every header line in buffer order.
pub fn list_file_headers(snapshot: &Snapshot) -> Vec<FileHeader> {
    snapshot
        .lines()
        .filter_map(|line| parse_header_line(&line))
        .collect()
}

/// Collects every numbered line in buffer order.
pub fn list_match_lines(snapshot: &Snapshot) -> Vec<MatchLine> {
    snapshot
        .lines()
        .filter_map(|line| parse_match_line(&line))
        .collect()
}

/// Regions used for file-to-file navigation: the header path spans.
pub fn file_match_regions(headers: &[FileHeader]) -> Vec<Region> {
    headers.iter().map(|h| h.region).collect()
}

/// Half-open offset range of each group.
///
/// Header `i` owns `[headers[i].offset, headers[i + 1].offset)`; the last
/// header owns everything up to `buffer_len`.
pub fn group_bounds(headers: &[FileHeader], buffer_len: usize) -> Vec<Region> {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let end = headers.get(i + 1).map_or(buffer_len, |next| next.offset);
            Region::new(header.offset, end)
        })
        .collect()
}

/// Keeps only the matches that sit in the same group as `caret`.
///
/// The lower bound is the end of the last header region at or before the
/// caret, the upper bound the start of the first header after it (or
/// `buffer_len`). Both bounds are exclusive. Before the first header the
/// lower bound is the start of the buffer, inclusive.
pub fn filter_to_current_group(
    caret: usize,
    matches: &[Region],
    headers: &[Region],
    buffer_len: usize,
) -> Vec<Region> {
    let lower = headers.iter().rev().find(|h| h.begin <= caret).map(|h| h.end);
    let upper = headers
        .iter()
        .find(|h| h.begin > caret)
        .map_or(buffer_len, |h| h.begin);

    matches
        .iter()
        .filter(|m| match lower {
            Some(lower) => lower < m.begin && m.begin < upper,
            None => m.begin < upper,
        })
        .copied()
        .collect()
}

/// Shared directory of all header paths.
pub fn common_path_prefix(headers: &[FileHeader]) -> Option<PathBuf> {
    common_dir_prefix(headers.iter().map(|h| Path::new(&h.path)))
}

/// Regions covering the shared directory prefix at the start of each header,
/// so folding them leaves only the distinguishing tail visible.
pub fn path_prefix_regions(headers: &[FileHeader]) -> Vec<Region> {
    let Some(prefix) = common_path_prefix(headers) else {
        return Vec::new();
    };

    headers
        .iter()
        .filter_map(|h| {
            let len = prefix_len_in(&h.path, &prefix)?;
            Some(Region::new(h.region.begin, h.region.begin + len))
        })
        .collect()
}

#[cfg(test)]
mod tests;
