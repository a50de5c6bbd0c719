//! Screen buffer
//!
//! Character buffer for the terminal's 128x64 panel: 8 rows of 21
//! characters, one text style per row.

use heapless::String;
use overspeed_protocol::{TextStyle, DISPLAY_COLS, DISPLAY_ROWS};

/// Number of character rows
pub const SCREEN_ROWS: usize = DISPLAY_ROWS as usize;

/// Number of character columns
pub const SCREEN_COLS: usize = DISPLAY_COLS as usize;

/// Maximum characters per line
pub const LINE_LEN: usize = SCREEN_COLS;

/// Styled text-mode screen buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    styles: [TextStyle; SCREEN_ROWS],
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create an empty screen
    pub const fn new() -> Self {
        Self {
            lines: [
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
            styles: [TextStyle::Normal; SCREEN_ROWS],
        }
    }

    /// Clear all rows
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.styles = [TextStyle::Normal; SCREEN_ROWS];
    }

    /// Set a row in the normal style
    pub fn set_line(&mut self, row: usize, text: &str) {
        self.set_styled_line(row, text, TextStyle::Normal);
    }

    /// Set a row's text and style, truncating at the row width
    ///
    /// Rows outside the screen are ignored.
    pub fn set_styled_line(&mut self, row: usize, text: &str, style: TextStyle) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };

        line.clear();
        for c in text.chars() {
            if line.push(c).is_err() {
                break;
            }
        }
        self.styles[row] = style;
    }

    /// Text of a row, empty outside the screen
    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map(|s| s.as_str()).unwrap_or("")
    }

    /// Style of a row
    pub fn style(&self, row: usize) -> TextStyle {
        self.styles.get(row).copied().unwrap_or_default()
    }

    /// Iterate over `(row, style, text)` for non-empty rows
    pub fn rows(&self) -> impl Iterator<Item = (usize, TextStyle, &str)> {
        self.lines
            .iter()
            .zip(self.styles.iter())
            .enumerate()
            .filter(|(_, (line, _))| !line.is_empty())
            .map(|(row, (line, style))| (row, *style, line.as_str()))
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
