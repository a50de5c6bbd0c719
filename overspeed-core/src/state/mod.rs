//! Screen lifecycle state machine
//!
//! Tracks where the session is between power-up and teardown: waiting for
//! location access, waiting for the first fix, tracking, or stopped on an
//! error. The machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{ErrorKind, State};
