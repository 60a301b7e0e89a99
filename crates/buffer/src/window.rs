// Chunk: docs/chunks/windowed_formatter - Right-aligned line numbering for a line window

//! Windowed, line-numbered rendering of a source text.
//!
//! A window is requested with 1-based inclusive line numbers and resolved
//! against the actual line count: the start is clamped at the first line and
//! the end at the last. Every line in the window is prefixed with its line
//! number, right-aligned to a width fixed by the clamped window end.
//!
//! ```
//! use smart_read_buffer::format_window;
//!
//! assert_eq!(format_window("a\nb\nc", 1, 3), "1 | a\n2 | b\n3 | c");
//! ```

use crate::line_index::LineIndex;

/// Separator between the line number column and the line content.
pub const GUTTER_SEPARATOR: &str = " | ";

/// A resolved line window: 0-based half-open indices into the line list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineWindow {
    /// First line index to render (0-based).
    pub start_idx: usize,
    /// One past the last line index to render (0-based).
    pub end_idx: usize,
    /// Total number of lines in the text.
    pub total: usize,
}

impl LineWindow {
    /// Resolves a 1-based inclusive request against `total` lines.
    ///
    /// Zero and negative requests clamp instead of failing. Returns `None`
    /// when the window starts at or past the end of the text.
    pub fn resolve(total: usize, start_line: i64, end_line: i64) -> Option<Self> {
        let start_idx = to_index(start_line.saturating_sub(1));
        if start_idx >= total {
            return None;
        }
        let end_idx = to_index(end_line).min(total);

        Some(Self {
            start_idx,
            end_idx,
            total,
        })
    }

    /// Width of the line number column.
    ///
    /// This is the digit count of the clamped window end, even when the last
    /// line actually printed has fewer digits.
    pub fn number_width(&self) -> usize {
        self.end_idx.to_string().len()
    }

    /// Returns true if the window contains no lines.
    pub fn is_empty(&self) -> bool {
        self.end_idx <= self.start_idx
    }
}

fn to_index(value: i64) -> usize {
    usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}

/// The diagnostic returned when a window starts past the end of the text.
pub fn end_of_file_message(total: usize) -> String {
    format!("⚠️ End of file reached (Total lines: {})", total)
}

/// Renders one line with its right-aligned line number.
pub fn format_line(line_number: usize, width: usize, content: &str) -> String {
    format!("{:>width$}{}{}", line_number, GUTTER_SEPARATOR, content, width = width)
}

/// Renders lines `start_line..=end_line` (1-based) of `content`.
///
/// Lines are joined with `\n` and no trailing newline is added. A window
/// starting past the last line yields [`end_of_file_message`]; a window whose
/// end precedes its start yields an empty string.
pub fn format_window(content: &str, start_line: i64, end_line: i64) -> String {
    let index = LineIndex::new(content);
    let Some(window) = LineWindow::resolve(index.line_count(), start_line, end_line) else {
        return end_of_file_message(index.line_count());
    };

    let width = window.number_width();
    (window.start_idx..window.end_idx)
        .map(|i| {
            let line = index.line(content, i).unwrap_or_default();
            format_line(i + 1, width, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
