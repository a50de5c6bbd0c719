//! Screen view trait

use crate::input::Glyph;
use crate::speed::DisplayModel;

/// Everything the screen shows at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFrame<'a> {
    /// Title row
    pub title: &'a str,
    /// Error message, if any
    pub error: Option<&'a str>,
    /// Raw threshold text (km/h)
    pub threshold_text: &'a str,
    /// Shown in place of empty threshold text
    pub threshold_placeholder: &'a str,
    /// Glyph under the editor cursor
    pub cursor: Glyph,
    /// Speed readout
    pub readout: &'a DisplayModel,
    /// Location permission prompt is open
    pub prompt_open: bool,
}

/// Renders the speed screen
///
/// Called synchronously after every sample and every threshold change.
pub trait ScreenView {
    /// Draw a frame
    fn render(&mut self, frame: &ViewFrame<'_>);
}
