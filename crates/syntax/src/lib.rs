// Chunk: docs/chunks/literal_spans - Tree-sitter literal scanning
// Chunk: docs/chunks/literal_truncation - Line-preserving literal truncation

//! smart-read-syntax: literal scanning and truncation for smart-read.
//!
//! This crate finds string-like literals with tree-sitter and shortens the
//! ones that are too long, without changing the number of lines in the text.
//!
//! # Overview
//!
//! The main types are:
//!
//! - [`Grammar`] and [`LanguageRegistry`]: map names and file extensions to a
//!   tree-sitter language plus a query for its literal nodes.
//!
//! - [`TreeSitterLiterals`]: the [`LiteralSource`] that parses a text and
//!   returns its [`LiteralSpan`]s as byte ranges.
//!
//! - [`truncate`]: rewrites every literal longer than a [`TruncationLimit`],
//!   applying the resulting [`Edit`]s highest offset first.
//!
//! # Example
//!
//! ```
//! use smart_read_syntax::{truncate, Grammar, LiteralSource, TreeSitterLiterals, TruncationLimit};
//!
//! let source = "const s = `one\ntwo\nthree four five six seven`;\nrun(s);\n";
//! let mut scanner = TreeSitterLiterals::for_grammar(Grammar::JavaScript).unwrap();
//! let spans = scanner.literal_spans(source).unwrap();
//!
//! let truncated = truncate(source, &spans, TruncationLimit::MaxBytes(10));
//! assert!(truncated.contains("[TRUNCATED 35 CHARS]"));
//! assert_eq!(truncated.lines().count(), source.lines().count());
//! assert_eq!(truncated.lines().last(), Some("run(s);"));
//! ```

mod edit;
mod literals;
mod registry;
mod truncate;

pub use edit::{Edit, EditSet};
pub use literals::{
    LiteralKind, LiteralSource, LiteralSpan, ParseError, SetupError, SyntaxErrorPolicy,
    TreeSitterLiterals,
};
pub use registry::{Grammar, LanguageConfig, LanguageRegistry, UnknownGrammar};
pub use truncate::{
    literal_replacement, truncate, truncate_with_report, TruncatedLiteral, Truncation,
    TruncationLimit, DEFAULT_CHAR_LIMIT, PREVIEW_CHARS,
};
