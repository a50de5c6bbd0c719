//! Screen → link protocol frames

use overspeed_protocol::{ControllerMessage, Frame, FrameError};

use crate::screen::{Screen, SCREEN_ROWS};

/// Encode a screen as a series of frames
///
/// Yields a clear command, then one styled text command per non-empty row.
pub fn encode_screen(screen: &Screen) -> impl Iterator<Item = Frame> + '_ {
    ScreenEncoder {
        screen,
        state: EncoderState::Clear,
    }
}

/// Build a PONG response frame
pub fn pong_frame() -> Result<Frame, FrameError> {
    ControllerMessage::Pong.to_frame()
}

struct ScreenEncoder<'a> {
    screen: &'a Screen,
    state: EncoderState,
}

#[derive(Clone, Copy)]
enum EncoderState {
    Clear,
    Row(usize),
    Done,
}

impl Iterator for ScreenEncoder<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                EncoderState::Clear => {
                    self.state = EncoderState::Row(0);
                    return ControllerMessage::Clear.to_frame().ok();
                }
                EncoderState::Row(row) if row < SCREEN_ROWS => {
                    self.state = EncoderState::Row(row + 1);

                    let text = self.screen.line(row);
                    if text.is_empty() {
                        continue;
                    }
                    let msg = ControllerMessage::Text {
                        row: row as u8,
                        col: 0,
                        style: self.screen.style(row),
                        text,
                    };
                    return msg.to_frame().ok();
                }
                EncoderState::Row(_) => self.state = EncoderState::Done,
                EncoderState::Done => return None,
            }
        }
    }
}
