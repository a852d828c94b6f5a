//! Run derivation - turns a boundary set into alternating revealed/hidden text

use serde::{Deserialize, Serialize};

use crate::ToggleSet;

/// Which state a line starts in at offset 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Offset 0 is revealed; spans between boundary pairs are hidden
    #[default]
    Normal,
    /// Offset 0 is hidden; exactly the spans `Normal` hides are revealed
    Reverse,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Normal => DisplayMode::Reverse,
            DisplayMode::Reverse => DisplayMode::Normal,
        }
    }

    pub(crate) fn starts_hidden(self) -> bool {
        matches!(self, DisplayMode::Reverse)
    }
}

/// A maximal span of code points sharing one state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    pub end: usize,
    pub hidden: bool,
}

impl Run {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split `[0, len)` at every boundary, alternating state from `mode`'s start.
///
/// Empty runs (consecutive boundaries, or a boundary at 0 or `len`) are
/// skipped but still flip the state.
pub fn runs(boundaries: &ToggleSet, len: usize, mode: DisplayMode) -> Vec<Run> {
    let mut result = Vec::with_capacity(boundaries.len() + 1);
    let mut hidden = mode.starts_hidden();
    let mut last = 0;

    for point in boundaries.iter().take_while(|&point| point <= len) {
        if point > last {
            result.push(Run {
                start: last,
                end: point,
                hidden,
            });
        }
        last = point;
        hidden = !hidden;
    }
    if len > last {
        result.push(Run {
            start: last,
            end: len,
            hidden,
        });
    }
    result
}

/// Render `text` with every hidden code point replaced by `glyph`.
pub fn mask_text(text: &str, boundaries: &ToggleSet, mode: DisplayMode, glyph: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut points = boundaries.iter().peekable();
    let mut hidden = mode.starts_hidden();

    for (index, ch) in text.chars().enumerate() {
        if points.next_if_eq(&index).is_some() {
            hidden = !hidden;
        }
        out.push(if hidden { glyph } else { ch });
    }
    out
}
