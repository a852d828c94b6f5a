//! Document model - the ordered line sequence and edit reconciliation
//!
//! Every edit hands the document the full new text. Lines are matched
//! against the existing sequence by common prefix and suffix so that only
//! the changed span is rebuilt; everything outside it keeps its instance
//! and its accumulated mask boundaries.

use tracing::debug;

use crate::line::{LineId, MaskedLine};
use crate::render::DisplayMode;
use crate::{CharClass, Classifier, Error, MASK_GLYPH, Result};

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Splice {
    /// First line index of the replaced span
    pub start: usize,
    /// Number of old lines dropped
    pub removed: usize,
    /// Number of fresh lines inserted
    pub inserted: usize,
}

impl Splice {
    pub fn is_noop(&self) -> bool {
        self.removed == 0 && self.inserted == 0
    }
}

#[derive(Debug)]
pub struct Document {
    lines: Vec<MaskedLine>,
    mode: DisplayMode,
    glyph: char,
    next_id: u64,
}

impl Document {
    /// A document holding a single empty line
    pub fn new() -> Self {
        Self::with_style(DisplayMode::default(), MASK_GLYPH)
    }

    pub fn with_style(mode: DisplayMode, glyph: char) -> Self {
        let mut doc = Self {
            lines: Vec::new(),
            mode,
            glyph,
            next_id: 0,
        };
        let first = doc.create_line(String::new());
        doc.lines.push(first);
        doc
    }

    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::new();
        doc.apply_text(text);
        doc
    }

    pub fn lines(&self) -> &[MaskedLine] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&MaskedLine> {
        self.lines.get(index)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn mask_glyph(&self) -> char {
        self.glyph
    }

    /// Reconcile the line sequence against `text`.
    ///
    /// Lines in the common prefix and suffix are kept as they are. The
    /// differing span of old lines is dropped and replaced with fresh lines
    /// (empty boundaries) for the differing span of the new text.
    pub fn apply_text(&mut self, text: &str) -> Splice {
        let new_lines: Vec<&str> = text.split('\n').collect();
        let old_count = self.lines.len();
        let new_count = new_lines.len();
        let bound = old_count.min(new_count);

        let prefix = self
            .lines
            .iter()
            .zip(&new_lines)
            .take_while(|(old, new)| old.original() == **new)
            .count();

        // Bounded by what the prefix left over so the two matches never overlap.
        let suffix = self
            .lines
            .iter()
            .rev()
            .zip(new_lines.iter().rev())
            .take(bound - prefix)
            .take_while(|(old, new)| old.original() == **new)
            .count();

        let old_end = old_count - suffix;
        let new_end = new_count - suffix;

        let fresh: Vec<MaskedLine> = new_lines[prefix..new_end]
            .iter()
            .map(|text| self.create_line(*text))
            .collect();
        let splice = Splice {
            start: prefix,
            removed: old_end - prefix,
            inserted: fresh.len(),
        };

        if !splice.is_noop() {
            // The replaced lines are dropped along with the splice iterator.
            self.lines.splice(prefix..old_end, fresh);
            debug!(
                start = splice.start,
                removed = splice.removed,
                inserted = splice.inserted,
                "reconciled lines"
            );
        }
        splice
    }

    /// Apply a rule to every line.
    pub fn mask_by_rule<C: Classifier + ?Sized>(&mut self, classifier: &C) {
        for line in &mut self.lines {
            line.mask_by_rule(classifier);
        }
    }

    pub fn mask_by_class(&mut self, class: CharClass) {
        debug!(%class, lines = self.lines.len(), "mask by class");
        self.mask_by_rule(&class);
    }

    /// Toggle the boundaries around `[start, end)` on one line.
    ///
    /// Returns `Ok(false)` for an empty selection. Bad line indices and
    /// offsets are rejected without changing anything.
    pub fn toggle_range(&mut self, index: usize, start: usize, end: usize) -> Result<bool> {
        let count = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(Error::LineOutOfRange { index, count })?;
        line.toggle_range(start, end)
    }

    /// Clear the boundaries of every line.
    pub fn reset(&mut self) {
        debug!(lines = self.lines.len(), "reset all lines");
        for line in &mut self.lines {
            line.reset();
        }
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
        for line in &mut self.lines {
            line.set_display_mode(mode);
        }
    }

    /// Flip between normal and reverse display; returns the new mode.
    pub fn toggle_display_mode(&mut self) -> DisplayMode {
        let mode = self.mode.toggled();
        self.set_display_mode(mode);
        mode
    }

    pub fn set_mask_glyph(&mut self, glyph: char) {
        self.glyph = glyph;
        for line in &mut self.lines {
            line.set_glyph(glyph);
        }
    }

    /// Masked views of all lines joined by line breaks
    pub fn export(&self) -> String {
        self.join_views(true)
    }

    /// Plain views of all lines joined by line breaks
    pub fn export_plain(&self) -> String {
        self.join_views(false)
    }

    /// The source text the document currently holds
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(MaskedLine::original)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn join_views(&self, masked: bool) -> String {
        self.lines
            .iter()
            .map(|line| line.render(masked))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn create_line(&mut self, text: impl Into<String>) -> MaskedLine {
        let id = LineId(self.next_id);
        self.next_id += 1;
        MaskedLine::with_style(id, text, self.mode, self.glyph)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
