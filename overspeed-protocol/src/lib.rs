//! Display terminal link protocol
//!
//! UART protocol between the controller and the display terminal. The
//! terminal is dumb: it captures encoder input and draws styled text. All
//! screen logic lives on the controller.
//!
//! # Frame format
//!
//! ```text
//! ┌──────┬────────┬──────┬─────────────┬───────┐
//! │ SYNC │ LENGTH │ TYPE │ PAYLOAD     │ CRC-8 │
//! │ 0x7E │ 1B     │ 1B   │ 0–64B       │ 1B    │
//! └──────┴────────┴──────┴─────────────┴───────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod events;
pub mod frame;
pub mod messages;

pub use events::InputEvent;
pub use frame::{crc8, Frame, FrameError, FrameParser, FRAME_SYNC, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{
    ControllerMessage, DisplayCommand, TextStyle, DISPLAY_COLS, DISPLAY_ROWS,
};
