//! GPS receiver support

pub mod nmea;

pub use nmea::{NmeaError, NmeaReader, Rmc, MAX_SENTENCE_LEN};
