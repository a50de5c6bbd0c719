//! Encoder input events from the display terminal
//!
//! Carried as the single payload byte of an `MSG_INPUT` frame:
//!
//! | Byte   | Event        |
//! |--------|--------------|
//! | `0x01` | clockwise    |
//! | `0x02` | anticlockwise|
//! | `0x10` | click        |
//! | `0x11` | long press   |
//! | `0x12` | release      |

/// Input event reported by the terminal's rotary encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// One detent clockwise
    EncoderCw,
    /// One detent counter-clockwise
    EncoderCcw,
    /// Short press (<500 ms)
    EncoderClick,
    /// Long press (>=500 ms)
    EncoderLongPress,
    /// Button released after a long press
    EncoderRelease,
}

// Wire format values
const EVENT_ENCODER_CW: u8 = 0x01;
const EVENT_ENCODER_CCW: u8 = 0x02;
const EVENT_ENCODER_CLICK: u8 = 0x10;
const EVENT_ENCODER_LONG_PRESS: u8 = 0x11;
const EVENT_ENCODER_RELEASE: u8 = 0x12;

impl InputEvent {
    /// Parse an event from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            EVENT_ENCODER_CW => Some(InputEvent::EncoderCw),
            EVENT_ENCODER_CCW => Some(InputEvent::EncoderCcw),
            EVENT_ENCODER_CLICK => Some(InputEvent::EncoderClick),
            EVENT_ENCODER_LONG_PRESS => Some(InputEvent::EncoderLongPress),
            EVENT_ENCODER_RELEASE => Some(InputEvent::EncoderRelease),
            _ => None,
        }
    }

    /// Wire byte for this event
    pub fn to_byte(self) -> u8 {
        match self {
            InputEvent::EncoderCw => EVENT_ENCODER_CW,
            InputEvent::EncoderCcw => EVENT_ENCODER_CCW,
            InputEvent::EncoderClick => EVENT_ENCODER_CLICK,
            InputEvent::EncoderLongPress => EVENT_ENCODER_LONG_PRESS,
            InputEvent::EncoderRelease => EVENT_ENCODER_RELEASE,
        }
    }

    /// True for a detent in either direction, which the threshold editor
    /// turns into a cursor move
    pub fn is_rotation(&self) -> bool {
        matches!(self, InputEvent::EncoderCw | InputEvent::EncoderCcw)
    }

    /// Rotation as a signed step (-1, 0, or +1)
    pub fn rotation_delta(&self) -> i8 {
        match self {
            InputEvent::EncoderCw => 1,
            InputEvent::EncoderCcw => -1,
            _ => 0,
        }
    }
}
