//! Buzzer support

pub mod clip;

pub use clip::{ClipPlayer, Tone, ToneOutput, ALERT_CLIP};
