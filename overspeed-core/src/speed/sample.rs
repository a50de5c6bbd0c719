//! Instantaneous speed readings

use crate::units::mps_to_kmh;

/// One speed reading from the location subsystem
///
/// The value is whatever the receiver reported. Receivers without a valid
/// velocity solution report a missing field (carried as NaN) or a negative
/// number; both pass through evaluation unchanged. NaN never compares above
/// a limit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedSample {
    /// Speed over ground in meters per second
    pub meters_per_second: f32,
}

impl SpeedSample {
    /// Create a sample from a speed in meters per second
    pub const fn new(meters_per_second: f32) -> Self {
        Self { meters_per_second }
    }

    /// Sample for a fix that carried no speed at all
    pub const fn unavailable() -> Self {
        Self {
            meters_per_second: f32::NAN,
        }
    }

    /// Speed in kilometers per hour (unrounded)
    pub fn kilometers_per_hour(&self) -> f32 {
        mps_to_kmh(self.meters_per_second)
    }
}

impl Default for SpeedSample {
    fn default() -> Self {
        Self::new(0.0)
    }
}
