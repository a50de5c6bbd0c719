//! Speed screen rendering
//!
//! This crate provides:
//! - `Screen`, a styled 8×21 character buffer
//! - `SpeedScreen`, the `ScreenView` that lays a session frame out on it
//! - `encode_screen`, which turns a screen into link protocol frames
//! - `DisplayBackend` and `draw_message` for the terminal side, including
//!   the inverted rendering of danger text on monochrome panels
//!
//! # Architecture
//!
//! The controller renders into a `Screen` and streams it to the display
//! terminal over UART. The terminal applies each `ControllerMessage` to its
//! local panel through a `DisplayBackend`.

#![no_std]

pub mod backend;
pub mod encode;
pub mod layout;
pub mod screen;

pub use backend::{draw_message, DisplayBackend, DisplayError};
pub use encode::{encode_screen, pong_frame};
pub use layout::SpeedScreen;
pub use screen::{Screen, LINE_LEN, SCREEN_COLS, SCREEN_ROWS};
