//! Hardware driver implementations
//!
//! Board-independent halves of the speed alarm's peripherals:
//!
//! - GPS receiver: NMEA 0183 sentence assembly and `RMC` decoding
//! - Buzzer: alert clip sequencing over a tone output

#![no_std]
#![deny(unsafe_code)]

pub mod audio;
pub mod gps;
