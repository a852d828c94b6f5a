//! Core masking logic for veil
//!
//! This crate contains:
//! - ToggleSet (sorted boundary offsets with toggle semantics)
//! - Character classifiers for rule-based masking
//! - MaskedLine (one line, its boundaries and its two views)
//! - Document (the line sequence and edit reconciliation)

pub mod classifier;
pub mod document;
pub mod error;
pub mod line;
pub mod render;
pub mod toggle_set;

pub use classifier::{CharClass, Classifier, MASK_GLYPH, SYMBOL_CHARACTERS};
pub use document::{Document, Splice};
pub use error::{Error, Result};
pub use line::{LineId, LineViews, MaskedLine};
pub use render::{DisplayMode, Run};
pub use toggle_set::ToggleSet;
