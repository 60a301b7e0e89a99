// Chunk: docs/chunks/render_pipeline - Read, truncate and render a line window

//! The render pipeline: read a file, truncate its long literals, and render a
//! numbered line window.
//!
//! Every failure here is recoverable. Missing or unreadable files produce a
//! message instead of a window. A missing or failing parser produces the
//! window of the untouched text, prefixed by a warning line.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use smart_read_buffer::format_window;
use smart_read_syntax::{
    truncate_with_report, Grammar, LanguageRegistry, LiteralSource, ParseError,
    SyntaxErrorPolicy, TreeSitterLiterals, Truncation, TruncationLimit,
};
use tracing::{debug, info, warn};

use crate::config::Config;

/// Marker prefixed to output rendered after a parse failure.
pub const PARSE_WARNING_PREFIX: &str = "⚠️ AST Warning: ";
/// Marker prefixed to output rendered without any parser.
pub const UNAVAILABLE_PREFIX: &str = "⚠️ Literal truncation unavailable: ";
/// Marker for a path that does not exist.
pub const NOT_FOUND_PREFIX: &str = "❌ Error: File not found: ";
/// Marker for a file that exists but could not be read.
pub const UNREADABLE_PREFIX: &str = "❌ Error reading file: ";

/// Everything that can keep a window from being rendered as asked.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No parser could be set up; literals cannot be located at all.
    #[error("literal scanning unavailable: {0}")]
    CollaboratorUnavailable(String),
    /// A parser exists but failed on this input.
    #[error("parse failure: {0}")]
    ParseFailure(#[from] ParseError),
    /// The input path does not exist.
    #[error("file not found: {}", path.display())]
    SourceNotFound { path: PathBuf },
    /// The input exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RenderError {
    /// The line shown to the end user for this error.
    pub fn user_message(&self) -> String {
        match self {
            RenderError::CollaboratorUnavailable(reason) => format!("{}{}", UNAVAILABLE_PREFIX, reason),
            RenderError::ParseFailure(cause) => format!("{}{}", PARSE_WARNING_PREFIX, cause),
            RenderError::SourceNotFound { path } => format!("{}{}", NOT_FOUND_PREFIX, path.display()),
            RenderError::SourceUnreadable { source, .. } => format!("{}{}", UNREADABLE_PREFIX, source),
        }
    }
}

/// Whether a literal scanner is available for this invocation.
pub enum ParserCapability {
    /// A scanner that can locate literals.
    Available(Box<dyn LiteralSource>),
    /// No scanner, with the reason.
    Unavailable(String),
}

impl ParserCapability {
    /// Sets up a tree-sitter scanner for `grammar`, or records why it could
    /// not be set up.
    pub fn for_grammar(grammar: Grammar, policy: SyntaxErrorPolicy) -> Self {
        match TreeSitterLiterals::for_grammar(grammar) {
            Ok(scanner) => ParserCapability::Available(Box::new(scanner.with_policy(policy))),
            Err(err) => {
                warn!(error = %err, "literal scanner setup failed");
                ParserCapability::Unavailable(err.to_string())
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ParserCapability::Available(_))
    }
}

/// Renders line windows of source texts, truncating long literals first.
pub struct Renderer {
    capability: ParserCapability,
    limit: TruncationLimit,
}

impl Renderer {
    /// Creates a renderer with the default truncation limit.
    pub fn new(capability: ParserCapability) -> Self {
        Self {
            capability,
            limit: TruncationLimit::default(),
        }
    }

    /// Sets the truncation limit.
    pub fn with_limit(mut self, limit: TruncationLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Truncates the long literals of `source`.
    ///
    /// With truncation disabled the parser is not consulted and the text is
    /// returned unchanged.
    pub fn truncate(&mut self, source: &str) -> Result<Truncation, RenderError> {
        if self.limit == TruncationLimit::Disabled {
            return Ok(truncate_with_report(source, &[], self.limit));
        }

        let scanner = match &mut self.capability {
            ParserCapability::Available(scanner) => scanner,
            ParserCapability::Unavailable(reason) => {
                return Err(RenderError::CollaboratorUnavailable(reason.clone()));
            }
        };

        let spans = scanner.literal_spans(source)?;
        Ok(truncate_with_report(source, &spans, self.limit))
    }

    /// Renders lines `start_line..=end_line` of `contents` after truncation.
    ///
    /// If truncation is not possible, the untouched text is rendered under a
    /// warning line instead.
    pub fn render(&mut self, contents: &str, start_line: i64, end_line: i64) -> String {
        match self.truncate(contents) {
            Ok(truncation) => {
                if !truncation.literals.is_empty() {
                    info!(count = truncation.literals.len(), "truncated long literals");
                }
                format_window(&truncation.text, start_line, end_line)
            }
            Err(err) => {
                warn!(error = %err, "rendering without literal truncation");
                format!(
                    "{}\n{}",
                    err.user_message(),
                    format_window(contents, start_line, end_line)
                )
            }
        }
    }
}

/// Reads a source file, decoding invalid UTF-8 with replacement characters.
///
/// Files larger than `max_file_bytes` are reported as unreadable.
pub fn read_source(path: &Path, max_file_bytes: Option<u64>) -> Result<String, RenderError> {
    let classify = |source: io::Error| {
        if source.kind() == io::ErrorKind::NotFound {
            RenderError::SourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RenderError::SourceUnreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    };

    if let Some(limit) = max_file_bytes {
        let size = fs::metadata(path).map_err(classify)?.len();
        if size > limit {
            return Err(RenderError::SourceUnreadable {
                path: path.to_path_buf(),
                source: io::Error::other(format!(
                    "file too large ({} bytes, limit {})",
                    size, limit
                )),
            });
        }
    }

    let bytes = fs::read(path).map_err(classify)?;
    let source = String::from_utf8_lossy(&bytes).into_owned();
    debug!(path = %path.display(), bytes = bytes.len(), "read source");
    Ok(source)
}

/// Picks the grammar for a path by its extension, or `fallback` if the
/// extension is missing or unknown.
pub fn grammar_for_path(registry: &LanguageRegistry, path: &Path, fallback: Grammar) -> Grammar {
    registry
        .config_for_path(path)
        .map_or(fallback, |config| config.grammar)
}

/// Renders a window of `file_contents`, parsed as JavaScript, truncating
/// literals longer than `char_limit` bytes.
///
/// ```
/// let out = smart_read::render("a\nb\nc", 1, 3, 200);
/// assert_eq!(out, "1 | a\n2 | b\n3 | c");
/// ```
pub fn render(file_contents: &str, start_line: i64, end_line: i64, char_limit: i64) -> String {
    let capability = ParserCapability::for_grammar(Grammar::JavaScript, SyntaxErrorPolicy::Tolerate);
    Renderer::new(capability)
        .with_limit(TruncationLimit::from_signed(char_limit))
        .render(file_contents, start_line, end_line)
}

/// Renders a window of the file at `path` with the given configuration.
///
/// Never fails: errors become the returned message.
pub fn render_file_with_config(path: &Path, start_line: i64, end_line: i64, config: &Config) -> String {
    let source = match read_source(path, config.max_file_bytes) {
        Ok(source) => source,
        Err(err) => {
            warn!(error = %err, "cannot render file");
            return err.user_message();
        }
    };

    let grammar = match config.grammar {
        Some(grammar) => grammar,
        None => grammar_for_path(&LanguageRegistry::new(), path, config.default_grammar),
    };
    debug!(path = %path.display(), %grammar, "rendering file");

    let capability = ParserCapability::for_grammar(grammar, config.syntax_error_policy());
    Renderer::new(capability)
        .with_limit(TruncationLimit::from_signed(config.char_limit))
        .render(&source, start_line, end_line)
}

/// Renders a window of the file at `path`, truncating literals longer than
/// `char_limit` bytes. The grammar follows the file extension.
pub fn render_file(path: &Path, start_line: i64, end_line: i64, char_limit: i64) -> String {
    let config = Config {
        char_limit,
        ..Config::default()
    };
    render_file_with_config(path, start_line, end_line, &config)
}
