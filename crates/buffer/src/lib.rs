// Chunk: docs/chunks/windowed_formatter - Line index and windowed line formatting

//! smart-read-buffer: line indexing and windowed rendering for smart-read.
//!
//! # Overview
//!
//! - [`LineIndex`] splits a text into lines on `\n`, `\r\n` and `\r`, with no
//!   trailing empty line after a final terminator.
//! - [`format_window`] renders a 1-based inclusive range of lines, each
//!   prefixed by a right-aligned line number.
//!
//! # Example
//!
//! ```
//! use smart_read_buffer::{count_lines, format_window};
//!
//! let content = "let a = 1;\nlet b = 2;\n";
//! assert_eq!(count_lines(content), 2);
//! assert_eq!(format_window(content, 2, 5), "2 | let b = 2;");
//! ```

mod line_index;
mod window;

pub use line_index::{count_line_breaks, count_lines, LineIndex};
pub use window::{end_of_file_message, format_line, format_window, LineWindow, GUTTER_SEPARATOR};
