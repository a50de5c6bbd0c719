//! Speed evaluation
//!
//! Turns a raw speed sample and the user's threshold text into the
//! readout shown on screen and the alert decision.

pub mod evaluator;
pub mod sample;
pub mod threshold;

pub use evaluator::{evaluate, DisplayModel, Readout, SpeedEvaluator, READOUT_LEN};
pub use sample::SpeedSample;
pub use threshold::{Threshold, ThresholdFull, ThresholdInput, MAX_THRESHOLD_LEN};
