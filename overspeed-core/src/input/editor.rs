//! Encoder-driven text entry for the threshold field
//!
//! The display has a single rotary encoder, so text is entered with a glyph
//! wheel: rotating moves the cursor through `0-9 . <`, a click applies the
//! glyph under the cursor, a long press empties the field.

use overspeed_protocol::InputEvent;

use crate::speed::ThresholdInput;

/// One position on the glyph wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    /// Decimal digit 0-9
    Digit(u8),
    /// Decimal point
    Point,
    /// Delete last character
    Delete,
}

impl Glyph {
    /// Character shown for this glyph
    pub fn as_char(&self) -> char {
        match self {
            Glyph::Digit(d) => (b'0' + (*d).min(9)) as char,
            Glyph::Point => '.',
            Glyph::Delete => '<',
        }
    }
}

/// Glyph wheel order
pub const GLYPH_WHEEL: [Glyph; 12] = [
    Glyph::Digit(0),
    Glyph::Digit(1),
    Glyph::Digit(2),
    Glyph::Digit(3),
    Glyph::Digit(4),
    Glyph::Digit(5),
    Glyph::Digit(6),
    Glyph::Digit(7),
    Glyph::Digit(8),
    Glyph::Digit(9),
    Glyph::Point,
    Glyph::Delete,
];

/// Result of feeding an input event to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditResult {
    /// Nothing changed
    Unchanged,
    /// Cursor moved, text unchanged
    CursorMoved,
    /// Threshold text changed
    TextChanged,
}

/// Glyph wheel editor
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThresholdEditor {
    index: usize,
}

impl ThresholdEditor {
    /// Create an editor with the cursor on `0`
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    /// Glyph under the cursor
    pub fn selected(&self) -> Glyph {
        GLYPH_WHEEL[self.index]
    }

    /// Move the cursor, wrapping around the wheel
    pub fn rotate(&mut self, delta: i8) {
        let len = GLYPH_WHEEL.len() as i32;
        let next = (self.index as i32 + delta as i32).rem_euclid(len);
        self.index = next as usize;
    }

    /// Apply the glyph under the cursor to the text
    ///
    /// Returns true if the text changed. A full field ignores new characters.
    pub fn apply(&self, input: &mut ThresholdInput) -> bool {
        match self.selected() {
            Glyph::Delete => input.pop().is_some(),
            glyph => input.push(glyph.as_char()).is_ok(),
        }
    }

    /// Feed an encoder event
    pub fn handle(&mut self, event: InputEvent, input: &mut ThresholdInput) -> EditResult {
        match event {
            rotation if rotation.is_rotation() => {
                self.rotate(rotation.rotation_delta());
                EditResult::CursorMoved
            }
            InputEvent::EncoderClick => {
                if self.apply(input) {
                    EditResult::TextChanged
                } else {
                    EditResult::Unchanged
                }
            }
            InputEvent::EncoderLongPress => {
                if input.is_empty() {
                    EditResult::Unchanged
                } else {
                    input.clear();
                    EditResult::TextChanged
                }
            }
            _ => EditResult::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_chars() {
        assert_eq!(Glyph::Digit(0).as_char(), '0');
        assert_eq!(Glyph::Digit(9).as_char(), '9');
        assert_eq!(Glyph::Point.as_char(), '.');
        assert_eq!(Glyph::Delete.as_char(), '<');
    }

    #[test]
    fn test_rotation_wraps() {
        let mut editor = ThresholdEditor::new();
        assert_eq!(editor.selected(), Glyph::Digit(0));

        editor.rotate(-1);
        assert_eq!(editor.selected(), Glyph::Delete);

        editor.rotate(1);
        assert_eq!(editor.selected(), Glyph::Digit(0));

        editor.rotate(13);
        assert_eq!(editor.selected(), Glyph::Digit(1));
    }

    #[test]
    fn test_encoder_events() {
        let mut editor = ThresholdEditor::new();
        let mut input = ThresholdInput::from_text("50").unwrap();

        assert_eq!(
            editor.handle(InputEvent::EncoderCcw, &mut input),
            EditResult::CursorMoved
        );
        assert_eq!(editor.selected(), Glyph::Delete);
        assert_eq!(
            editor.handle(InputEvent::EncoderRelease, &mut input),
            EditResult::Unchanged
        );
        assert_eq!(input.as_str(), "50");
    }

    #[test]
    fn test_type_number() {
        let mut editor = ThresholdEditor::new();
        let mut input = ThresholdInput::new();

        // "80": rotate to 8, click, rotate back to 0, click
        for _ in 0..8 {
            editor.handle(InputEvent::EncoderCw, &mut input);
        }
        assert_eq!(
            editor.handle(InputEvent::EncoderClick, &mut input),
            EditResult::TextChanged
        );
        for _ in 0..8 {
            editor.handle(InputEvent::EncoderCcw, &mut input);
        }
        editor.handle(InputEvent::EncoderClick, &mut input);

        assert_eq!(input.as_str(), "80");
    }

    #[test]
    fn test_delete() {
        let mut editor = ThresholdEditor::new();
        let mut input = ThresholdInput::from_text("50").unwrap();

        editor.handle(InputEvent::EncoderCcw, &mut input);
        assert_eq!(editor.selected(), Glyph::Delete);
        assert_eq!(
            editor.handle(InputEvent::EncoderClick, &mut input),
            EditResult::TextChanged
        );
        assert_eq!(input.as_str(), "5");

        editor.handle(InputEvent::EncoderClick, &mut input);
        assert_eq!(
            editor.handle(InputEvent::EncoderClick, &mut input),
            EditResult::Unchanged
        );
        assert!(input.is_empty());
    }

    #[test]
    fn test_long_press_clears() {
        let mut editor = ThresholdEditor::new();
        let mut input = ThresholdInput::from_text("120").unwrap();

        assert_eq!(
            editor.handle(InputEvent::EncoderLongPress, &mut input),
            EditResult::TextChanged
        );
        assert!(input.is_empty());
        assert_eq!(
            editor.handle(InputEvent::EncoderLongPress, &mut input),
            EditResult::Unchanged
        );
    }

    #[test]
    fn test_full_field_ignores_input() {
        let editor = ThresholdEditor::new();
        let mut input = ThresholdInput::from_text("999999").unwrap();
        assert!(!editor.apply(&mut input));
        assert_eq!(input.as_str(), "999999");
    }

    #[test]
    fn test_point_makes_non_numeric_text_possible() {
        let mut editor = ThresholdEditor::new();
        let mut input = ThresholdInput::new();

        editor.rotate(10);
        assert_eq!(editor.selected(), Glyph::Point);
        editor.handle(InputEvent::EncoderClick, &mut input);
        assert_eq!(input.as_str(), ".");
    }
}
