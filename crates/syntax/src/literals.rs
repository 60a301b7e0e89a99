// Chunk: docs/chunks/literal_spans - Literal span extraction over tree-sitter

//! String-like literal spans and the parser that finds them.
//!
//! The truncator only needs byte ranges of literal nodes. [`LiteralSource`]
//! is that seam; [`TreeSitterLiterals`] implements it with a tree-sitter
//! parser and a capture query from the [`registry`](crate::registry).

use std::ops::Range;

use streaming_iterator::StreamingIterator;
use tracing::debug;
use tree_sitter::{Node, Parser, Query, QueryCursor};

use crate::registry::{Grammar, LanguageConfig};

/// The kind of grammar node a literal span came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// A quoted string.
    String,
    /// A template string (backtick literal, possibly spanning lines).
    TemplateString,
}

/// A half-open byte range `[start, end)` of one literal in a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LiteralSpan {
    /// Byte offset of the opening delimiter
    pub start: usize,
    /// Byte offset one past the closing delimiter
    pub end: usize,
    /// Which node kind produced this span
    pub kind: LiteralKind,
}

impl LiteralSpan {
    pub fn new(start: usize, end: usize, kind: LiteralKind) -> Self {
        Self { start, end, kind }
    }

    /// Length of the span in bytes. Reversed spans have length 0.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns the literal's text in `source`.
    ///
    /// Returns None if the span is reversed, out of bounds, or does not fall
    /// on UTF-8 char boundaries.
    pub fn text<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.range())
    }
}

/// Errors raised while building a literal scanner.
///
/// These mean the parsing capability is missing, not that a particular input
/// failed to parse.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("grammar '{grammar}' is incompatible with the tree-sitter runtime: {source}")]
    Language {
        grammar: Grammar,
        #[source]
        source: tree_sitter::LanguageError,
    },
    #[error("literal query for '{grammar}' is invalid: {source}")]
    Query {
        grammar: Grammar,
        #[source]
        source: tree_sitter::QueryError,
    },
}

/// Errors raised while parsing one source text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The parser produced no tree at all.
    #[error("{grammar} parser produced no syntax tree")]
    NoTree { grammar: Grammar },
    /// The tree contains an error node and errors are being rejected.
    #[error("{grammar} syntax error at line {line}, column {column}")]
    Syntax {
        grammar: Grammar,
        /// 1-based line of the first error node
        line: usize,
        /// 1-based column (in bytes) of the first error node
        column: usize,
    },
}

/// What to do with a tree that contains syntax errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyntaxErrorPolicy {
    /// Use whatever literal nodes the error-recovering parser produced.
    #[default]
    Tolerate,
    /// Fail with [`ParseError::Syntax`].
    Reject,
}

/// Anything that can locate string-like literals in a source text.
pub trait LiteralSource {
    /// The grammar this source parses with.
    fn grammar(&self) -> Grammar;

    /// Returns the literal spans of `source`, in no particular order.
    fn literal_spans(&mut self, source: &str) -> Result<Vec<LiteralSpan>, ParseError>;
}

/// Capture name that marks template strings in literal queries.
const TEMPLATE_CAPTURE: &str = "literal.template";

/// Finds literal spans with a tree-sitter parser.
///
/// Each call parses from scratch; no tree is kept between calls.
pub struct TreeSitterLiterals {
    grammar: Grammar,
    parser: Parser,
    query: Query,
    policy: SyntaxErrorPolicy,
}

impl TreeSitterLiterals {
    /// Creates a scanner for the given language configuration.
    pub fn new(config: &LanguageConfig) -> Result<Self, SetupError> {
        let grammar = config.grammar;

        let mut parser = Parser::new();
        parser
            .set_language(&config.language)
            .map_err(|source| SetupError::Language { grammar, source })?;

        let query = Query::new(&config.language, config.literals_query)
            .map_err(|source| SetupError::Query { grammar, source })?;

        Ok(Self {
            grammar,
            parser,
            query,
            policy: SyntaxErrorPolicy::default(),
        })
    }

    /// Creates a scanner for a grammar.
    pub fn for_grammar(grammar: Grammar) -> Result<Self, SetupError> {
        Self::new(&grammar.config())
    }

    /// Sets the syntax error policy.
    pub fn with_policy(mut self, policy: SyntaxErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn kind_for_capture(&self, capture_index: u32) -> LiteralKind {
        let name = self.query.capture_names().get(capture_index as usize).copied();
        if name == Some(TEMPLATE_CAPTURE) {
            LiteralKind::TemplateString
        } else {
            LiteralKind::String
        }
    }
}

impl LiteralSource for TreeSitterLiterals {
    fn grammar(&self) -> Grammar {
        self.grammar
    }

    fn literal_spans(&mut self, source: &str) -> Result<Vec<LiteralSpan>, ParseError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(ParseError::NoTree { grammar: self.grammar })?;
        let root = tree.root_node();

        if root.has_error() {
            let position = first_error(root).map(|node| node.start_position());
            let (line, column) = position.map_or((1, 1), |p| (p.row + 1, p.column + 1));
            match self.policy {
                SyntaxErrorPolicy::Reject => {
                    return Err(ParseError::Syntax {
                        grammar: self.grammar,
                        line,
                        column,
                    });
                }
                SyntaxErrorPolicy::Tolerate => {
                    debug!(grammar = %self.grammar, line, column, "tolerating syntax error");
                }
            }
        }

        let mut spans = Vec::new();
        let mut cursor = QueryCursor::new();
        let mut captures = cursor.captures(&self.query, root, source.as_bytes());
        while let Some((mat, capture_idx)) = captures.next() {
            let capture = &mat.captures[*capture_idx];
            let node = capture.node;
            spans.push(LiteralSpan::new(
                node.start_byte(),
                node.end_byte(),
                self.kind_for_capture(capture.index),
            ));
        }

        debug!(grammar = %self.grammar, count = spans.len(), "collected literal spans");
        Ok(spans)
    }
}

/// Returns the first error or missing node under `node`, in document order.
///
/// Walks with a cursor, descending only into subtrees that contain an error,
/// so deep trees do not grow the call stack.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    loop {
        let current = cursor.node();
        if current.is_error() || current.is_missing() {
            return Some(current);
        }
        if current.has_error() && cursor.goto_first_child() {
            continue;
        }
        // Next sibling, or the next sibling of the nearest ancestor
        loop {
            if cursor.node() == node {
                return None;
            }
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}
