// Chunk: docs/chunks/windowed_formatter - Line splitting with splitlines semantics

//! Line index for tracking line boundaries in a source text.
//!
//! Lines are split on `\n`, `\r\n` and `\r`. A final unterminated line is
//! included, while a text ending exactly at a terminator does not produce an
//! extra empty trailing line. Empty text has zero lines.

use std::ops::Range;

/// Tracks line boundaries in a source text.
///
/// Offsets are byte offsets into the UTF-8 text. Both line terminators are
/// ASCII, so every stored offset is a valid char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offsets where each line starts.
    line_starts: Vec<usize>,
    /// Byte offsets where each line's content ends (the terminator is excluded).
    line_ends: Vec<usize>,
}

impl LineIndex {
    /// Builds the line index for the given content.
    ///
    /// This is O(n) in the content length.
    pub fn new(content: &str) -> Self {
        let bytes = content.as_bytes();
        let mut index = Self::default();

        let mut start = 0;
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => {
                    index.push_line(start, i);
                    i += 1;
                    start = i;
                }
                b'\r' => {
                    index.push_line(start, i);
                    // \r\n is a single terminator
                    i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                    start = i;
                }
                _ => i += 1,
            }
        }

        if start < bytes.len() {
            index.push_line(start, bytes.len());
        }

        index
    }

    fn push_line(&mut self, start: usize, end: usize) {
        self.line_starts.push(start);
        self.line_ends.push(end);
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns true if the text has no lines at all.
    pub fn is_empty(&self) -> bool {
        self.line_starts.is_empty()
    }

    /// Returns the byte range of a line's content, excluding its terminator.
    ///
    /// Returns None if the line index is out of bounds.
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        let start = *self.line_starts.get(line)?;
        let end = *self.line_ends.get(line)?;
        Some(start..end)
    }

    /// Returns the content of a line in `content`, which must be the text
    /// this index was built from.
    pub fn line<'a>(&self, content: &'a str, line: usize) -> Option<&'a str> {
        self.line_range(line).and_then(|range| content.get(range))
    }

    /// Returns the line containing the given byte offset.
    ///
    /// Offsets inside a terminator belong to the line it ends. Offsets past
    /// the end map to the last line. Returns None for text with no lines.
    pub fn line_at_offset(&self, offset: usize) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        Some(match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        })
    }
}

/// Returns the number of lines in `content`, using the same splitting rules
/// as [`LineIndex`].
pub fn count_lines(content: &str) -> usize {
    LineIndex::new(content).line_count()
}

/// Returns the number of line terminators in `content`.
///
/// `\r\n` counts once. For any text, inserting exactly this many `\n`
/// characters in place of it keeps [`count_lines`] of the surrounding text
/// unchanged.
pub fn count_line_breaks(content: &str) -> usize {
    let bytes = content.as_bytes();
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => count += 1,
            b'\r' => {
                count += 1;
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    count
}
