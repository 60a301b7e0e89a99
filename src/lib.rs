// Chunk: docs/chunks/render_pipeline - Read, truncate and render a line window

//! smart-read: read a window of a source file with over-long string literals
//! collapsed.
//!
//! Literals longer than a byte limit are replaced by a short preview of their
//! start and end. The replacement keeps every line break of the literal, so
//! line numbers in the rendered window match the file on disk.
//!
//! # Example
//!
//! ```
//! let source = format!("const a = 1;\nconst s = \"{}\";\nconst b = 2;", "x".repeat(300));
//! let out = smart_read::render(&source, 2, 3, 200);
//!
//! let lines: Vec<&str> = out.lines().collect();
//! assert!(lines[0].starts_with("2 | const s = \"xxxxxxxxxxxxxxxxxxx ...[TRUNCATED 302 CHARS]... "));
//! assert_eq!(lines[1], "3 | const b = 2;");
//! ```

pub mod config;
pub mod render;

pub use config::Config;
pub use render::{
    grammar_for_path, read_source, render, render_file, render_file_with_config,
    ParserCapability, RenderError, Renderer,
};
