//! Speed screen layout
//!
//! ```text
//! row 0  OVERSPEED
//! row 1  Permission to access      (error, wrapped onto two rows)
//! row 2  location was denied
//! row 3  Limit: 50 km/h            (placeholder "(50)" when empty)
//! row 4  Current speed is
//! row 5  20.00 m/s                 (Safe, or Danger when alerting)
//! row 6  72.00 km/h                (Safe, or Danger when alerting)
//! row 7  Edit [5] hold=clear
//! ```
//!
//! While the location prompt is open the whole screen is replaced by the
//! question and its two answers.

use core::fmt::Write;

use heapless::String;
use overspeed_core::traits::{ScreenView, ViewFrame};
use overspeed_protocol::TextStyle;

use crate::screen::{Screen, LINE_LEN};

type Line = String<LINE_LEN>;

const ROW_TITLE: usize = 0;
const ROW_ERROR: usize = 1;
const ROW_THRESHOLD: usize = 3;
const ROW_CAPTION: usize = 4;
const ROW_MPS: usize = 5;
const ROW_KMH: usize = 6;
const ROW_EDITOR: usize = 7;

/// Lays session frames out on a [`Screen`]
#[derive(Debug, Clone, Default)]
pub struct SpeedScreen {
    screen: Screen,
}

impl SpeedScreen {
    pub const fn new() -> Self {
        Self {
            screen: Screen::new(),
        }
    }

    /// Current screen content
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Splash shown before the session mounts
    pub fn render_boot(&mut self, title: &str) {
        self.screen.clear();
        self.screen.set_line(ROW_TITLE, title);
        self.screen.set_line(3, "Starting...");
    }

    fn render_prompt(&mut self, title: &str) {
        self.screen.set_line(ROW_TITLE, title);
        self.screen.set_line(2, "Allow access to");
        self.screen.set_line(3, "your location?");
        self.screen.set_line(5, "Click: allow");
        self.screen.set_line(6, "Hold:  deny");
    }

    fn render_speed(&mut self, frame: &ViewFrame<'_>) {
        self.screen.set_line(ROW_TITLE, frame.title);

        if let Some(message) = frame.error {
            let (first, second) = wrap_two_rows(message);
            self.screen
                .set_styled_line(ROW_ERROR, &first, TextStyle::Danger);
            self.screen
                .set_styled_line(ROW_ERROR + 1, &second, TextStyle::Danger);
        }

        let mut line = Line::new();
        if frame.threshold_text.is_empty() {
            let _ = write!(line, "Limit: ({}) km/h", frame.threshold_placeholder);
        } else {
            let _ = write!(line, "Limit: {} km/h", frame.threshold_text);
        }
        self.screen.set_line(ROW_THRESHOLD, &line);

        self.screen.set_line(ROW_CAPTION, "Current speed is");

        let style = if frame.readout.alert_active {
            TextStyle::Danger
        } else {
            TextStyle::Safe
        };

        line.clear();
        let _ = write!(line, "{} m/s", frame.readout.meters_per_second);
        self.screen.set_styled_line(ROW_MPS, &line, style);

        line.clear();
        let _ = write!(line, "{} km/h", frame.readout.kilometers_per_hour);
        self.screen.set_styled_line(ROW_KMH, &line, style);

        line.clear();
        let _ = write!(line, "Edit [{}] hold=clear", frame.cursor.as_char());
        self.screen.set_line(ROW_EDITOR, &line);
    }
}

impl ScreenView for SpeedScreen {
    fn render(&mut self, frame: &ViewFrame<'_>) {
        self.screen.clear();
        if frame.prompt_open {
            self.render_prompt(frame.title);
        } else {
            self.render_speed(frame);
        }
    }
}

/// Greedy word wrap onto two rows; the rest is cut
fn wrap_two_rows(text: &str) -> (Line, Line) {
    let mut rows = [Line::new(), Line::new()];
    let mut current = 0;

    for word in text.split_whitespace() {
        while current < rows.len() {
            let row = &mut rows[current];
            let needed = word.len() + usize::from(!row.is_empty());

            if row.len() + needed <= LINE_LEN {
                if !row.is_empty() {
                    let _ = row.push(' ');
                }
                let _ = row.push_str(word);
                break;
            }

            if row.is_empty() {
                // Word wider than a row: hard cut
                for c in word.chars() {
                    if row.push(c).is_err() {
                        break;
                    }
                }
                break;
            }

            current += 1;
        }
    }

    let [first, second] = rows;
    (first, second)
}
