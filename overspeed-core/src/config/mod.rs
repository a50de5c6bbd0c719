//! Configuration types
//!
//! Board-agnostic configuration structures and the reader for the embedded
//! TOML file. The build script deserialises the same file into these types
//! (serde feature) to reject bad configs before flashing.

pub mod toml;
pub mod types;

pub use toml::{parse_config, ParseError};
pub use types::*;
