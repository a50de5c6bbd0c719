//! NMEA 0183 decoding
//!
//! The receiver streams sentences such as
//!
//! ```text
//! $GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A
//! ```
//!
//! Only `RMC` (recommended minimum) is decoded, from any talker (`GP`, `GN`,
//! `GL`, ...). It carries everything the speed alarm needs: validity,
//! position, and speed over ground in knots. Other sentence types are
//! skipped.
//!
//! [`NmeaReader`] assembles sentences from raw UART bytes; [`Rmc::parse`]
//! decodes a single sentence.

use heapless::String;
use overspeed_core::location::{Fix, FixQuality};
use overspeed_core::speed::SpeedSample;
use overspeed_core::units::knots_to_mps;

/// Longest sentence accepted, including `$` and the checksum
///
/// The standard limit is 82 including CR LF; some receivers exceed it.
pub const MAX_SENTENCE_LEN: usize = 96;

/// Errors from sentence assembly or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NmeaError {
    /// No `*hh` checksum suffix
    MissingChecksum,
    /// Checksum does not match the sentence body
    ChecksumMismatch,
    /// Sentence is not `RMC`
    NotRmc,
    /// Too few fields
    Truncated,
    /// A field could not be decoded
    InvalidField,
    /// Sentence exceeded [`MAX_SENTENCE_LEN`]
    TooLong,
    /// Non-printable byte inside a sentence
    Garbled,
}

/// Decoded `RMC` sentence
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rmc {
    /// UTC time of day in ms
    pub utc_time_ms: Option<u32>,
    /// Status field was `A` (data valid)
    pub valid: bool,
    /// Latitude in degrees, north positive
    pub latitude_deg: Option<f64>,
    /// Longitude in degrees, east positive
    pub longitude_deg: Option<f64>,
    /// Speed over ground in knots
    pub speed_knots: Option<f32>,
    /// Course over ground in degrees true
    pub course_deg: Option<f32>,
    /// Mode indicator (NMEA 2.3+), `None` on older receivers
    pub mode: Option<char>,
}

// Field indices after the address field
const F_TIME: usize = 1;
const F_STATUS: usize = 2;
const F_LAT: usize = 3;
const F_LAT_HEMI: usize = 4;
const F_LON: usize = 5;
const F_LON_HEMI: usize = 6;
const F_SPEED: usize = 7;
const F_COURSE: usize = 8;
const F_MODE: usize = 12;
const MIN_FIELDS: usize = 10;
const MAX_FIELDS: usize = 14;

impl Rmc {
    /// Decode one sentence (with or without the leading `$` and trailing CR LF)
    pub fn parse(sentence: &str) -> Result<Self, NmeaError> {
        let sentence = sentence.trim_end();
        let sentence = sentence.strip_prefix('$').unwrap_or(sentence);
        if !sentence.is_ascii() {
            return Err(NmeaError::Garbled);
        }

        let (body, checksum) = sentence
            .rsplit_once('*')
            .ok_or(NmeaError::MissingChecksum)?;
        if checksum.len() != 2 {
            return Err(NmeaError::MissingChecksum);
        }
        let expected = u8::from_str_radix(checksum, 16).map_err(|_| NmeaError::MissingChecksum)?;
        if checksum_of(body) != expected {
            return Err(NmeaError::ChecksumMismatch);
        }

        let mut fields: [&str; MAX_FIELDS] = [""; MAX_FIELDS];
        let mut count = 0;
        for field in body.split(',') {
            if count == MAX_FIELDS {
                break;
            }
            fields[count] = field;
            count += 1;
        }

        let address = fields[0];
        if address.len() != 5 || !address.ends_with("RMC") {
            return Err(NmeaError::NotRmc);
        }
        if count < MIN_FIELDS {
            return Err(NmeaError::Truncated);
        }

        let valid = match fields[F_STATUS] {
            "A" => true,
            "V" => false,
            _ => return Err(NmeaError::InvalidField),
        };

        Ok(Self {
            utc_time_ms: optional(fields[F_TIME], parse_time)?,
            valid,
            latitude_deg: optional(fields[F_LAT], |s| {
                parse_coordinate(s, 2, 90.0, fields[F_LAT_HEMI], 'N', 'S')
            })?,
            longitude_deg: optional(fields[F_LON], |s| {
                parse_coordinate(s, 3, 180.0, fields[F_LON_HEMI], 'E', 'W')
            })?,
            speed_knots: optional(fields[F_SPEED], parse_f32)?,
            course_deg: optional(fields[F_COURSE], parse_f32)?,
            mode: fields[F_MODE].chars().next(),
        })
    }

    /// Positioning mode implied by status and mode indicator
    pub fn quality(&self) -> FixQuality {
        if !self.valid {
            return FixQuality::Invalid;
        }
        match self.mode {
            None | Some('A') => FixQuality::Autonomous,
            Some('D') => FixQuality::Differential,
            Some('E') => FixQuality::Estimated,
            Some('M') => FixQuality::Manual,
            Some('S') => FixQuality::Simulated,
            Some(_) => FixQuality::Invalid,
        }
    }

    /// Speed over ground, unavailable when the field was empty
    pub fn sample(&self) -> SpeedSample {
        match self.speed_knots {
            Some(knots) => SpeedSample::new(knots_to_mps(knots)),
            None => SpeedSample::unavailable(),
        }
    }

    /// Convert to a fix stamped with the local receive time
    ///
    /// Returns `None` when the sentence carries no position.
    pub fn to_fix(&self, timestamp_ms: u32) -> Option<Fix> {
        Some(Fix {
            latitude_deg: self.latitude_deg?,
            longitude_deg: self.longitude_deg?,
            sample: self.sample(),
            quality: self.quality(),
            timestamp_ms,
        })
    }
}

/// XOR of all bytes between `$` and `*`
pub fn checksum_of(body: &str) -> u8 {
    body.bytes().fold(0, |acc, b| acc ^ b)
}

fn optional<T>(
    field: &str,
    parse: impl FnOnce(&str) -> Result<T, NmeaError>,
) -> Result<Option<T>, NmeaError> {
    if field.is_empty() {
        Ok(None)
    } else {
        parse(field).map(Some)
    }
}

fn parse_f32(field: &str) -> Result<f32, NmeaError> {
    field.parse().map_err(|_| NmeaError::InvalidField)
}

/// `hhmmss[.sss]` → ms of day
fn parse_time(field: &str) -> Result<u32, NmeaError> {
    if field.len() < 6 {
        return Err(NmeaError::InvalidField);
    }
    let hours: u32 = field[0..2].parse().map_err(|_| NmeaError::InvalidField)?;
    let minutes: u32 = field[2..4].parse().map_err(|_| NmeaError::InvalidField)?;
    let seconds: f32 = field[4..].parse().map_err(|_| NmeaError::InvalidField)?;
    if hours > 23 || minutes > 59 || !(0.0..61.0).contains(&seconds) {
        return Err(NmeaError::InvalidField);
    }
    Ok((hours * 60 + minutes) * 60_000 + (seconds * 1000.0) as u32)
}

/// `d..dmm.mmmm` plus hemisphere → signed degrees
fn parse_coordinate(
    field: &str,
    degree_digits: usize,
    max_deg: f64,
    hemisphere: &str,
    positive: char,
    negative: char,
) -> Result<f64, NmeaError> {
    let dot = field.find('.').unwrap_or(field.len());
    if dot != degree_digits + 2 {
        return Err(NmeaError::InvalidField);
    }

    let degrees: f64 = field[..degree_digits]
        .parse()
        .map_err(|_| NmeaError::InvalidField)?;
    let minutes: f64 = field[degree_digits..]
        .parse()
        .map_err(|_| NmeaError::InvalidField)?;
    if !(0.0..60.0).contains(&minutes) {
        return Err(NmeaError::InvalidField);
    }

    let value = degrees + minutes / 60.0;
    if value > max_deg {
        return Err(NmeaError::InvalidField);
    }

    match hemisphere.chars().next() {
        Some(c) if c == positive => Ok(value),
        Some(c) if c == negative => Ok(-value),
        _ => Err(NmeaError::InvalidField),
    }
}

/// Assembles sentences from a byte stream
///
/// Bytes outside a `$ ... \n` span are ignored, so the reader locks on at
/// the next sentence start after power-up or line noise.
#[derive(Debug, Clone, Default)]
pub struct NmeaReader {
    buffer: String<MAX_SENTENCE_LEN>,
    in_sentence: bool,
}

impl NmeaReader {
    /// Create a reader
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
            in_sentence: false,
        }
    }

    /// Drop the partial sentence
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.in_sentence = false;
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(rmc))` when a valid `RMC` sentence completes,
    /// `Ok(None)` when more bytes are needed or another sentence type was
    /// skipped, and `Err` for a corrupt sentence.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Rmc>, NmeaError> {
        match byte {
            b'$' => {
                self.buffer.clear();
                self.in_sentence = true;
                Ok(None)
            }
            _ if !self.in_sentence => Ok(None),
            b'\r' => Ok(None),
            b'\n' => {
                self.in_sentence = false;
                let result = Rmc::parse(&self.buffer);
                self.buffer.clear();
                match result {
                    Ok(rmc) => Ok(Some(rmc)),
                    Err(NmeaError::NotRmc) => Ok(None),
                    Err(e) => Err(e),
                }
            }
            0x20..=0x7E => {
                if self.buffer.push(byte as char).is_err() {
                    self.reset();
                    return Err(NmeaError::TooLong);
                }
                Ok(None)
            }
            _ => {
                self.reset();
                Err(NmeaError::Garbled)
            }
        }
    }
}
