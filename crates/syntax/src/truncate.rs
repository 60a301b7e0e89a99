// Chunk: docs/chunks/literal_truncation - Line-preserving literal truncation

//! Truncation of over-long string literals that keeps line numbers stable.
//!
//! A literal longer than the limit is replaced by its opening delimiter, a
//! short head preview, a size marker, one `\n` for every line break the
//! literal contained, a short tail preview, and its closing delimiter:
//!
//! ```text
//! `first nineteen char ...[TRUNCATED 4210 CHARS]...
//!
//!
//! last nineteen chars`
//! ```
//!
//! Line breaks inside the previews are written as the escapes `\n` and `\r`,
//! so the padding block is the only place the replacement breaks a line. The
//! truncated text therefore has exactly as many lines as the original, and
//! every line after a truncated literal keeps its line number.
//!
//! Lengths and the limit are in bytes, matching the parser's span offsets.
//! Previews are counted in Unicode scalar values.

use std::collections::HashMap;

use smart_read_buffer::{count_line_breaks, LineIndex};
use tracing::{debug, warn};

use crate::edit::{Edit, EditSet};
use crate::literals::{LiteralKind, LiteralSpan};

/// Default literal length limit, in bytes.
pub const DEFAULT_CHAR_LIMIT: i64 = 200;

/// Characters kept on each side of a truncated literal, besides its delimiters.
pub const PREVIEW_CHARS: usize = 19;

/// Threshold above which a literal is truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncationLimit {
    /// Nothing is ever truncated.
    Disabled,
    /// Literals strictly longer than this many bytes are truncated.
    MaxBytes(usize),
}

impl TruncationLimit {
    /// Builds a limit from a caller-supplied integer. Negative values disable
    /// truncation.
    pub fn from_signed(limit: i64) -> Self {
        match usize::try_from(limit) {
            Ok(max) => TruncationLimit::MaxBytes(max),
            Err(_) => TruncationLimit::Disabled,
        }
    }

    /// Returns true if a literal of `len` bytes must be truncated.
    pub fn is_exceeded_by(&self, len: usize) -> bool {
        match self {
            TruncationLimit::Disabled => false,
            TruncationLimit::MaxBytes(max) => len > *max,
        }
    }
}

impl Default for TruncationLimit {
    fn default() -> Self {
        Self::from_signed(DEFAULT_CHAR_LIMIT)
    }
}

/// One literal that was shortened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncatedLiteral {
    /// 1-based line where the literal starts
    pub line: usize,
    /// Byte offset of the literal in the original text
    pub start: usize,
    /// Original length in bytes
    pub byte_len: usize,
    /// Line breaks carried over into the replacement
    pub line_breaks: usize,
    pub kind: LiteralKind,
}

/// The result of a truncation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncation {
    /// The rewritten text
    pub text: String,
    /// Literals that were shortened, in source order
    pub literals: Vec<TruncatedLiteral>,
    /// Over-long spans that were ignored because their offsets were unusable
    pub skipped: usize,
}

/// Builds the replacement text for one over-long literal.
///
/// `original` includes both delimiters. Previews clamp to the available
/// characters, so short literals never panic; for literals under 40
/// characters the two previews may overlap.
pub fn literal_replacement(original: &str) -> String {
    let chars: Vec<char> = original.chars().collect();
    let n = chars.len();
    let (Some(&first), Some(&last)) = (chars.first(), chars.last()) else {
        return String::new();
    };

    let head = &chars[1.min(n)..(PREVIEW_CHARS + 1).min(n)];
    let tail = &chars[n.saturating_sub(PREVIEW_CHARS + 1)..n - 1];
    let line_breaks = count_line_breaks(original);

    let mut out = String::with_capacity(2 * PREVIEW_CHARS + line_breaks + 48);
    push_escaped(&mut out, &[first]);
    push_escaped(&mut out, head);
    out.push_str(&format!(" ...[TRUNCATED {} CHARS]... ", original.len()));
    out.extend(std::iter::repeat('\n').take(line_breaks));
    push_escaped(&mut out, tail);
    push_escaped(&mut out, &[last]);
    out
}

fn push_escaped(out: &mut String, chars: &[char]) {
    for &ch in chars {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
}

/// Returns true if the span boundary falls between the `\r` and `\n` of a
/// CRLF pair. Replacing such a span would merge or split a line terminator.
fn splits_crlf(source: &str, span: &LiteralSpan) -> bool {
    let bytes = source.as_bytes();
    let splits_at = |offset: usize| {
        offset > 0 && bytes.get(offset - 1) == Some(&b'\r') && bytes.get(offset) == Some(&b'\n')
    };
    splits_at(span.start) || splits_at(span.end)
}

/// Truncates every literal in `spans` longer than `limit` and reports what
/// was changed.
///
/// Spans may arrive in any order. Spans that are out of bounds, reversed, or
/// not on char boundaries are skipped. Nested or overlapping spans resolve to
/// the outermost one. The pass runs once: replacements are never truncated
/// again.
pub fn truncate_with_report(source: &str, spans: &[LiteralSpan], limit: TruncationLimit) -> Truncation {
    let mut edits = EditSet::new();
    let mut kinds = HashMap::new();
    let mut skipped = 0;

    for span in spans {
        if !limit.is_exceeded_by(span.len()) {
            continue;
        }
        let original = match span.text(source) {
            Some(text) if !splits_crlf(source, span) => text,
            _ => {
                warn!(start = span.start, end = span.end, "skipping literal span with unusable offsets");
                skipped += 1;
                continue;
            }
        };
        edits.push(Edit::new(span.start, span.end, literal_replacement(original)));
        kinds.insert((span.start, span.end), span.kind);
    }

    if edits.is_empty() {
        return Truncation {
            text: source.to_string(),
            literals: Vec::new(),
            skipped,
        };
    }

    let ordered = edits.into_ordered();
    let index = LineIndex::new(source);
    let literals: Vec<TruncatedLiteral> = ordered
        .iter()
        .rev()
        .map(|edit| {
            let kind = kinds
                .get(&(edit.start, edit.end))
                .copied()
                .unwrap_or(LiteralKind::String);
            let line = index.line_at_offset(edit.start).map_or(1, |line| line + 1);
            let byte_len = edit.end - edit.start;
            let line_breaks = count_line_breaks(&source[edit.start..edit.end]);
            debug!(line, byte_len, line_breaks, "truncating literal");
            TruncatedLiteral {
                line,
                start: edit.start,
                byte_len,
                line_breaks,
                kind,
            }
        })
        .collect();

    let text = ordered.into_iter().collect::<EditSet>().apply(source);
    Truncation {
        text,
        literals,
        skipped,
    }
}

/// Truncates every literal in `spans` longer than `limit`.
///
/// See [`truncate_with_report`].
pub fn truncate(source: &str, spans: &[LiteralSpan], limit: TruncationLimit) -> String {
    truncate_with_report(source, spans, limit).text
}
