//! A single line of text and its mask boundaries

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::render::{self, DisplayMode, Run};
use crate::{Classifier, Error, MASK_GLYPH, Result, ToggleSet};

/// Identity of a line instance, stable for as long as the instance lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId(pub u64);

/// Both renderings of a line, always computed from the same boundary set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineViews {
    pub plain: String,
    pub masked: String,
}

/// One line of the document.
///
/// The original text is fixed for the lifetime of the instance; an edit to
/// the line produces a new instance through reconciliation.
#[derive(Debug, Clone)]
pub struct MaskedLine {
    id: LineId,
    original: String,
    /// Length of `original` in code points
    len: usize,
    boundaries: ToggleSet,
    mode: DisplayMode,
    glyph: char,
    views: LineViews,
}

impl MaskedLine {
    pub fn new(id: LineId, original: impl Into<String>) -> Self {
        Self::with_style(id, original, DisplayMode::default(), MASK_GLYPH)
    }

    pub fn with_style(
        id: LineId,
        original: impl Into<String>,
        mode: DisplayMode,
        glyph: char,
    ) -> Self {
        let original = original.into();
        let mut line = Self {
            id,
            len: original.chars().count(),
            original,
            boundaries: ToggleSet::new(),
            mode,
            glyph,
            views: LineViews::default(),
        };
        line.refresh();
        line
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Length in code points
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn boundaries(&self) -> &ToggleSet {
        &self.boundaries
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn views(&self) -> &LineViews {
        &self.views
    }

    /// The masked view when `masked` is set, the original text otherwise.
    pub fn render(&self, masked: bool) -> &str {
        if masked {
            &self.views.masked
        } else {
            &self.views.plain
        }
    }

    /// Masked rendering for an explicit starting parity, without touching state.
    pub fn render_with(&self, mode: DisplayMode) -> String {
        render::mask_text(&self.original, &self.boundaries, mode, self.glyph)
    }

    /// Revealed/hidden spans under the line's current display mode
    pub fn runs(&self) -> Vec<Run> {
        render::runs(&self.boundaries, self.len, self.mode)
    }

    /// XOR the edges of every maximal run matching `classifier` into the boundaries.
    ///
    /// Applying the same rule twice restores the previous state.
    pub fn mask_by_rule<C: Classifier + ?Sized>(&mut self, classifier: &C) {
        let mut previous = false;
        let mut toggled = 0usize;
        for (index, ch) in self.original.chars().enumerate() {
            let current = classifier.matches(ch);
            if current != previous {
                self.boundaries.toggle(index);
                toggled += 1;
            }
            previous = current;
        }
        if toggled > 0 {
            trace!(line = self.id.0, toggled, "mask by rule");
            self.refresh();
        }
    }

    /// Toggle the pair of boundaries around `[start, end)`.
    ///
    /// An empty or inverted selection is a no-op and returns `Ok(false)`.
    /// Offsets past the end of the line are rejected before any change.
    pub fn toggle_range(&mut self, start: usize, end: usize) -> Result<bool> {
        if start >= end {
            return Ok(false);
        }
        if end > self.len {
            return Err(Error::BoundaryOutOfRange {
                offset: end,
                len: self.len,
            });
        }
        self.boundaries.toggle(start);
        self.boundaries.toggle(end);
        trace!(line = self.id.0, start, end, "toggle range");
        self.refresh();
        Ok(true)
    }

    pub fn reset(&mut self) {
        if self.boundaries.is_empty() {
            return;
        }
        self.boundaries.reset();
        self.refresh();
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        if self.mode != mode {
            self.mode = mode;
            self.refresh();
        }
    }

    pub fn set_glyph(&mut self, glyph: char) {
        if self.glyph != glyph {
            self.glyph = glyph;
            self.refresh();
        }
    }

    /// Recompute both views together.
    fn refresh(&mut self) {
        self.views = LineViews {
            plain: self.original.clone(),
            masked: self.render_with(self.mode),
        };
    }
}
