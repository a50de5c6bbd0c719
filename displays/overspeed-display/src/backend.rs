//! Terminal-side panel abstraction
//!
//! The display terminal applies each received [`ControllerMessage`] to its
//! panel through a [`DisplayBackend`].

use overspeed_protocol::{ControllerMessage, TextStyle};

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel
    Communication,
    /// Row or column outside the panel
    InvalidCoordinates,
}

/// Character panel driven by the terminal
pub trait DisplayBackend {
    /// Clear the entire panel
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at a character position in the given colour
    ///
    /// Monochrome panels ignore the style.
    fn draw_text(
        &mut self,
        row: u8,
        col: u8,
        style: TextStyle,
        text: &str,
    ) -> Result<(), DisplayError>;

    /// Invert a region on a row (`end_col` exclusive)
    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8)
        -> Result<(), DisplayError>;

    /// Flush buffered content to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Panel dimensions as (columns, rows)
    fn dimensions(&self) -> (u8, u8);

    /// True for panels that can show `Safe`/`Danger` colours
    fn has_color(&self) -> bool;
}

/// Apply one controller message to a panel
///
/// On monochrome panels `Danger` text is drawn inverted so an alert stays
/// visible without colour.
pub fn draw_message<B: DisplayBackend>(
    backend: &mut B,
    message: &ControllerMessage<'_>,
) -> Result<(), DisplayError> {
    match message {
        ControllerMessage::Clear | ControllerMessage::Reset => backend.clear(),
        ControllerMessage::Text {
            row,
            col,
            style,
            text,
        } => {
            let (cols, rows) = backend.dimensions();
            if *row >= rows || *col >= cols {
                return Err(DisplayError::InvalidCoordinates);
            }

            backend.draw_text(*row, *col, *style, text)?;

            if *style == TextStyle::Danger && !backend.has_color() {
                let end = (*col as usize + text.len()).min(cols as usize) as u8;
                backend.invert_region(*row, *col, end)?;
            }
            Ok(())
        }
        ControllerMessage::Pong => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        Clear,
        Text(u8, u8, TextStyle),
        Invert(u8, u8, u8),
    }

    struct Recorder {
        color: bool,
        ops: Vec<Op, 8>,
    }

    impl Recorder {
        fn new(color: bool) -> Self {
            Self {
                color,
                ops: Vec::new(),
            }
        }
    }

    impl DisplayBackend for Recorder {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.ops.push(Op::Clear).map_err(|_| DisplayError::Communication)
        }

        fn draw_text(
            &mut self,
            row: u8,
            col: u8,
            style: TextStyle,
            _text: &str,
        ) -> Result<(), DisplayError> {
            self.ops
                .push(Op::Text(row, col, style))
                .map_err(|_| DisplayError::Communication)
        }

        fn invert_region(
            &mut self,
            row: u8,
            start_col: u8,
            end_col: u8,
        ) -> Result<(), DisplayError> {
            self.ops
                .push(Op::Invert(row, start_col, end_col))
                .map_err(|_| DisplayError::Communication)
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }

        fn dimensions(&self) -> (u8, u8) {
            (21, 8)
        }

        fn has_color(&self) -> bool {
            self.color
        }
    }

    fn danger() -> ControllerMessage<'static> {
        ControllerMessage::Text {
            row: 6,
            col: 0,
            style: TextStyle::Danger,
            text: "72.00 km/h",
        }
    }

    #[test]
    fn test_mono_inverts_danger() {
        let mut panel = Recorder::new(false);
        draw_message(&mut panel, &danger()).unwrap();
        assert_eq!(
            panel.ops.as_slice(),
            &[Op::Text(6, 0, TextStyle::Danger), Op::Invert(6, 0, 10)]
        );
    }

    #[test]
    fn test_color_draws_danger_plain() {
        let mut panel = Recorder::new(true);
        draw_message(&mut panel, &danger()).unwrap();
        assert_eq!(panel.ops.as_slice(), &[Op::Text(6, 0, TextStyle::Danger)]);
    }

    #[test]
    fn test_safe_never_inverted() {
        let mut panel = Recorder::new(false);
        let msg = ControllerMessage::Text {
            row: 5,
            col: 0,
            style: TextStyle::Safe,
            text: "1.00 m/s",
        };
        draw_message(&mut panel, &msg).unwrap();
        assert_eq!(panel.ops.as_slice(), &[Op::Text(5, 0, TextStyle::Safe)]);
    }

    #[test]
    fn test_out_of_range_row() {
        let mut panel = Recorder::new(true);
        let msg = ControllerMessage::Text {
            row: 8,
            col: 0,
            style: TextStyle::Normal,
            text: "x",
        };
        assert_eq!(
            draw_message(&mut panel, &msg),
            Err(DisplayError::InvalidCoordinates)
        );
        assert!(panel.ops.is_empty());
    }

    #[test]
    fn test_clear_and_reset() {
        let mut panel = Recorder::new(true);
        draw_message(&mut panel, &ControllerMessage::Clear).unwrap();
        draw_message(&mut panel, &ControllerMessage::Reset).unwrap();
        draw_message(&mut panel, &ControllerMessage::Pong).unwrap();
        assert_eq!(panel.ops.as_slice(), &[Op::Clear, Op::Clear]);
    }
}
