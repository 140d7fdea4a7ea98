//! Caret-centric scans over a results buffer.
//!
//! All lookups start at the line holding the single caret and walk the
//! snapshot's line index, either backward (enclosing header, search query)
//! or not at all (line number, column).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::buffer::{Line, Region, Snapshot};
use crate::error::{NavError, NavResult};
use crate::model::{FileHeader, SearchQuery, parse_header_line, parse_match_line, parse_search_line};

/// Where an open request should land.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OpenTarget {
    /// File named by the enclosing header
    pub path: PathBuf,

    /// 1-based line, when the caret sits on a numbered line
    pub line: Option<u64>,

    /// 1-based column in the source line, when `line` is known
    pub column: Option<usize>,
}

impl OpenTarget {
    /// Encodes the target as `path:line:column`, the locator editors accept
    /// for opening a file at a position.
    pub fn encoded(&self) -> String {
        match (self.line, self.column) {
            (Some(line), Some(column)) => format!("{}:{}:{}", self.path.display(), line, column),
            (Some(line), None) => format!("{}:{}", self.path.display(), line),
            _ => self.path.display().to_string(),
        }
    }
}

/// Returns the only caret, or [`NavError::AmbiguousSelection`] for zero or
/// several carets.
pub fn single_caret(selection: &[Region]) -> NavResult<Region> {
    match selection {
        [caret] => Ok(*caret),
        _ => Err(NavError::AmbiguousSelection(selection.len())),
    }
}

/// Finds the file whose group holds the caret.
///
/// Scans backward from the caret's line down to the first line of the
/// buffer and returns the first header whose path exists on disk.
///
/// # Errors
///
/// * [`NavError::AmbiguousSelection`] unless there is exactly one caret
/// * [`NavError::NotFound`] if no header with an existing path precedes the caret
pub fn find_enclosing_file_path(snapshot: &Snapshot, selection: &[Region]) -> NavResult<PathBuf> {
    find_enclosing_file_path_by(snapshot, selection, Path::exists)
}

/// Same as [`find_enclosing_file_path`] with a custom existence check.
pub fn find_enclosing_file_path_by<F>(
    snapshot: &Snapshot,
    selection: &[Region],
    exists: F,
) -> NavResult<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    let caret = single_caret(selection)?;

    snapshot
        .lines_backward_from(caret.begin)
        .filter_map(|line| parse_header_line(&line))
        .map(|header| PathBuf::from(header.path))
        .find(|path| exists(path.as_path()))
        .ok_or(NavError::NotFound("file header"))
}

/// Reads the source line number from the caret's line.
///
/// Only the caret's own line is inspected. Header lines, blank lines and
/// lines without a leading number yield [`NavError::NotFound`].
pub fn find_line_number(snapshot: &Snapshot, selection: &[Region]) -> NavResult<u64> {
    let caret = single_caret(selection)?;
    let line = snapshot.line_at(caret.begin);

    parse_match_line(&line)
        .map(|m| m.line_number)
        .ok_or(NavError::NotFound("line number"))
}

/// 1-based column in the source file matching the caret's position.
///
/// The gutter (`  12: `) is subtracted from the caret's column. A caret
/// inside the gutter maps to column 1.
pub fn find_column(snapshot: &Snapshot, selection: &[Region]) -> NavResult<usize> {
    let caret = single_caret(selection)?;
    let line = snapshot.line_at(caret.begin);
    let hit = parse_match_line(&line).ok_or(NavError::NotFound("line number"))?;

    let caret_col = snapshot.column_of(caret.begin);
    let gutter_col = snapshot.column_of(hit.content_offset);
    Ok(caret_col.saturating_sub(gutter_col) + 1)
}

/// The quoted term of the nearest `Searching ... "<term>"` line above the caret.
pub fn find_search_term(snapshot: &Snapshot, selection: &[Region]) -> NavResult<String> {
    find_search_query(snapshot, selection).map(|q| q.term)
}

/// The full query, flags included, of the nearest `Searching` line above the caret.
pub fn find_search_query(snapshot: &Snapshot, selection: &[Region]) -> NavResult<SearchQuery> {
    let caret = single_caret(selection)?;

    snapshot
        .lines_backward_from(caret.begin)
        .find_map(|line| parse_search_line(&line))
        .ok_or(NavError::NotFound("search term"))
}

/// Combines the enclosing file, line number and column.
///
/// The path is required; line and column are only filled in when the caret
/// sits on a numbered line.
pub fn find_open_target_by<F>(
    snapshot: &Snapshot,
    selection: &[Region],
    exists: F,
) -> NavResult<OpenTarget>
where
    F: Fn(&Path) -> bool,
{
    let path = find_enclosing_file_path_by(snapshot, selection, exists)?;
    let line = find_line_number(snapshot, selection).ok();
    let column = line.and_then(|_| find_column(snapshot, selection).ok());

    Ok(OpenTarget { path, line, column })
}

/// [`find_open_target_by`] checking paths against the disk.
pub fn find_open_target(snapshot: &Snapshot, selection: &[Region]) -> NavResult<OpenTarget> {
    find_open_target_by(snapshot, selection, Path::exists)
}

/// Header line of the group holding `caret`, without any existence check.
pub fn find_group_header(snapshot: &Snapshot, caret: usize) -> Option<(Line<'_>, FileHeader)> {
    snapshot
        .lines_backward_from(caret)
        .find_map(|line| parse_header_line(&line).map(|header| (line, header)))
}

/// Line that closes the group holding `caret`: the first blank line at or
/// after the caret's line, or the next header line below it, whichever
/// comes first. The end of the buffer closes the last group.
pub fn find_group_terminator(snapshot: &Snapshot, caret: usize) -> Region {
    let first = snapshot.line_index_of(caret);

    snapshot
        .lines_forward_from(caret)
        .find(|line| line.is_blank() || (line.index > first && parse_header_line(line).is_some()))
        .map_or(Region::point(snapshot.len()), |line| line.region)
}
