//! Threshold text entry

pub mod editor;

pub use editor::{EditResult, Glyph, ThresholdEditor, GLYPH_WHEEL};
