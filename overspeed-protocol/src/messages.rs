//! Message types
//!
//! - Display → Controller: input events, heartbeat requests
//! - Controller → Display: screen commands, heartbeat responses

use heapless::Vec;

use crate::events::InputEvent;
use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Message type IDs: Display → Controller
pub const MSG_INPUT: u8 = 0x01;
pub const MSG_PING: u8 = 0x02;

// Message type IDs: Controller → Display
pub const MSG_CLEAR: u8 = 0x20;
pub const MSG_TEXT: u8 = 0x21;
pub const MSG_PONG: u8 = 0x24;
pub const MSG_RESET: u8 = 0x2F;

/// Display dimensions
pub const DISPLAY_ROWS: u8 = 8;
pub const DISPLAY_COLS: u8 = 21;

/// How a text run is drawn
///
/// Colour panels draw `Safe` green and `Danger` red. Monochrome panels draw
/// `Danger` inverted and the others normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextStyle {
    #[default]
    Normal,
    Safe,
    Danger,
}

impl TextStyle {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(TextStyle::Normal),
            1 => Some(TextStyle::Safe),
            2 => Some(TextStyle::Danger),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            TextStyle::Normal => 0,
            TextStyle::Safe => 1,
            TextStyle::Danger => 2,
        }
    }
}

/// Messages from the controller to the display
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerMessage<'a> {
    /// Clear the entire screen
    Clear,
    /// Draw text at a position
    Text {
        row: u8,
        col: u8,
        style: TextStyle,
        text: &'a str,
    },
    /// Heartbeat response
    Pong,
    /// Reset display to boot state
    Reset,
}

impl<'a> ControllerMessage<'a> {
    /// Encode this message into a frame
    ///
    /// Text is cut at the row width.
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            ControllerMessage::Clear => Ok(Frame::empty(MSG_CLEAR)),
            ControllerMessage::Text {
                row,
                col,
                style,
                text,
            } => {
                // Payload: [row][col][style][len][chars...]
                let text_bytes = text.as_bytes();
                let len = text_bytes.len().min(DISPLAY_COLS as usize);

                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                payload
                    .extend_from_slice(&[*row, *col, style.to_byte(), len as u8])
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(&text_bytes[..len])
                    .map_err(|_| FrameError::PayloadTooLarge)?;

                Frame::new(MSG_TEXT, &payload)
            }
            ControllerMessage::Pong => Ok(Frame::empty(MSG_PONG)),
            ControllerMessage::Reset => Ok(Frame::empty(MSG_RESET)),
        }
    }

    /// Parse a message from a frame (display side, simulation)
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_CLEAR => Ok(ControllerMessage::Clear),
            MSG_TEXT => {
                let [row, col, style, len, rest @ ..] = frame.payload.as_slice() else {
                    return Err(FrameError::InvalidFrame);
                };
                let style = TextStyle::from_byte(*style).ok_or(FrameError::InvalidFrame)?;
                let bytes = rest.get(..*len as usize).ok_or(FrameError::InvalidFrame)?;
                let text = core::str::from_utf8(bytes).map_err(|_| FrameError::InvalidFrame)?;
                Ok(ControllerMessage::Text {
                    row: *row,
                    col: *col,
                    style,
                    text,
                })
            }
            MSG_PONG => Ok(ControllerMessage::Pong),
            MSG_RESET => Ok(ControllerMessage::Reset),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

/// Commands parsed from display-originated frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayCommand {
    /// User input event
    Input(InputEvent),
    /// Heartbeat request
    Ping,
}

impl DisplayCommand {
    /// Parse a command from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_INPUT => {
                let byte = frame.payload.first().ok_or(FrameError::InvalidFrame)?;
                let event = InputEvent::from_byte(*byte).ok_or(FrameError::InvalidFrame)?;
                Ok(DisplayCommand::Input(event))
            }
            MSG_PING => Ok(DisplayCommand::Ping),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode this command into a frame (for testing or simulation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            DisplayCommand::Input(event) => Frame::new(MSG_INPUT, &[event.to_byte()]),
            DisplayCommand::Ping => Ok(Frame::empty(MSG_PING)),
        }
    }
}
