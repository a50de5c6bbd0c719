//! Board-agnostic core logic for the speed alarm firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Unit conversion and the speed evaluator
//! - Threshold text input and its encoder-driven editor
//! - Watch option filtering for location fixes
//! - Alert re-trigger policy
//! - Lifecycle state machine
//! - Collaborator traits (location, audio, view)
//! - The session that composes them
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod alert;
pub mod config;
pub mod input;
pub mod location;
pub mod session;
pub mod speed;
pub mod state;
pub mod traits;
pub mod units;
