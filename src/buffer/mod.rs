//! Immutable buffer snapshots with a precomputed line index.
//!
//! Every command copies the results buffer once into a [`Snapshot`] and runs
//! all scans against it, instead of asking the host for the previous line on
//! each step. Offsets are byte offsets into the snapshot text.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[begin, end)`. A caret is an empty region.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Region {
    pub begin: usize,
    pub end: usize,
}

impl Region {
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// An empty region at `offset`.
    pub fn point(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_empty(&self) -> bool {
        self.begin >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    /// True if `offset` lies in `[begin, end]`, matching how editors treat a
    /// caret sitting right after the last character.
    pub fn contains(&self, offset: usize) -> bool {
        self.begin <= offset && offset <= self.end
    }
}

/// One line of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Zero-based line index
    pub index: usize,

    /// Byte range of the line, excluding its terminator
    pub region: Region,

    /// Line text, excluding `\n` and a preceding `\r`
    pub text: &'a str,
}

impl Line<'_> {
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Text of a buffer plus the byte offset of each line start.
#[derive(Debug, Clone)]
pub struct Snapshot {
    text: String,
    line_starts: Vec<usize>,
}

impl Snapshot {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));

        Self { text, line_starts }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of lines. A trailing newline opens one final empty line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Index of the line containing `offset`. Offsets past the end clamp to
    /// the last line.
    pub fn line_index_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        self.line_starts.partition_point(|&start| start <= offset) - 1
    }

    /// The line at `index`, or `None` past the last line.
    pub fn line(&self, index: usize) -> Option<Line<'_>> {
        let start = *self.line_starts.get(index)?;
        let mut end = self
            .line_starts
            .get(index + 1)
            .map_or(self.text.len(), |next| next - 1);

        if end > start && self.text.as_bytes()[end - 1] == b'\r' {
            end -= 1;
        }

        Some(Line {
            index,
            region: Region::new(start, end),
            text: &self.text[start..end],
        })
    }

    /// The line containing `offset`.
    pub fn line_at(&self, offset: usize) -> Line<'_> {
        let index = self.line_index_of(offset);
        // line_index_of always yields a valid index
        self.line(index).unwrap_or(Line {
            index,
            region: Region::point(self.text.len()),
            text: "",
        })
    }

    /// Lines from the one containing `offset` back to the first line.
    pub fn lines_backward_from(&self, offset: usize) -> impl Iterator<Item = Line<'_>> + '_ {
        let first = self.line_index_of(offset);
        (0..=first).rev().filter_map(move |i| self.line(i))
    }

    /// Lines from the one containing `offset` to the last line.
    pub fn lines_forward_from(&self, offset: usize) -> impl Iterator<Item = Line<'_>> + '_ {
        let first = self.line_index_of(offset);
        (first..self.line_count()).filter_map(move |i| self.line(i))
    }

    /// All lines in buffer order.
    pub fn lines(&self) -> impl Iterator<Item = Line<'_>> + '_ {
        (0..self.line_count()).filter_map(move |i| self.line(i))
    }

    /// Zero-based column of `offset` within its line, in characters.
    pub fn column_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        let start = self.line_starts[self.line_index_of(offset)];
        self.text
            .get(start..offset)
            .map_or(offset - start, |prefix| prefix.chars().count())
    }

    /// Byte offset of the first character of the 1-based `line`, clamped to
    /// the buffer, plus a 1-based character `column` clamped to the line.
    pub fn offset_of(&self, line: usize, column: usize) -> usize {
        let Some(line) = self.line(line.saturating_sub(1).min(self.line_count() - 1)) else {
            return self.text.len();
        };

        line.text
            .char_indices()
            .nth(column.saturating_sub(1))
            .map_or(line.region.end, |(i, _)| line.region.begin + i)
    }
}
