// Chunk: docs/chunks/literal_truncation - Reverse-order edit application

//! Byte-range substitutions applied to a source text.
//!
//! Edits are collected first and applied afterwards against one buffer,
//! highest start offset first, so replacing a range never shifts the offsets
//! of an edit still waiting to be applied. [`EditSet`] enforces that order
//! regardless of the order edits were pushed in.

use tracing::{debug, warn};

/// A substitution of `source[start..end]` by `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Byte offset where the replaced range starts
    pub start: usize,
    /// Byte offset where the replaced range ends (exclusive)
    pub end: usize,
    /// The text that replaces the range
    pub replacement: String,
}

impl Edit {
    pub fn new(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }

    /// Returns true if the two edits replace intersecting byte ranges.
    pub fn overlaps(&self, other: &Edit) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns true if this edit can be applied to `source`.
    fn fits(&self, source: &str) -> bool {
        self.start <= self.end
            && self.end <= source.len()
            && source.is_char_boundary(self.start)
            && source.is_char_boundary(self.end)
    }
}

/// A collection of edits against one source text.
#[derive(Debug, Clone, Default)]
pub struct EditSet {
    edits: Vec<Edit>,
}

impl EditSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an edit. Order of insertion does not matter.
    pub fn push(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Returns the edits in application order: descending start offset,
    /// with overlapping edits resolved.
    ///
    /// When two edits overlap, the one starting first wins; among edits with
    /// the same start, the longest wins. For nested literals this keeps the
    /// outermost edit.
    pub fn into_ordered(self) -> Vec<Edit> {
        let mut edits = self.edits;
        edits.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

        let mut kept: Vec<Edit> = Vec::with_capacity(edits.len());
        for edit in edits {
            if let Some(last) = kept.last() {
                if edit.overlaps(last) {
                    debug!(
                        start = edit.start,
                        end = edit.end,
                        "dropping edit overlapping [{}, {})",
                        last.start,
                        last.end
                    );
                    continue;
                }
            }
            kept.push(edit);
        }

        kept.reverse();
        kept
    }

    /// Applies all edits to a copy of `source`, highest start offset first.
    ///
    /// Edits that do not fit `source` (out of bounds, reversed, or splitting
    /// a UTF-8 character) are skipped.
    pub fn apply(self, source: &str) -> String {
        let mut result = source.to_string();
        for edit in self.into_ordered() {
            if !edit.fits(source) {
                warn!(start = edit.start, end = edit.end, "skipping edit outside source bounds");
                continue;
            }
            result.replace_range(edit.start..edit.end, &edit.replacement);
        }
        result
    }
}

impl FromIterator<Edit> for EditSet {
    fn from_iter<I: IntoIterator<Item = Edit>>(iter: I) -> Self {
        Self {
            edits: iter.into_iter().collect(),
        }
    }
}
