//! Position fixes

use crate::speed::SpeedSample;

/// Receiver positioning mode for a fix
///
/// Mirrors the NMEA 0183 mode indicator (`A`, `D`, `E`, `M`, `S`, `N`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixQuality {
    /// Autonomous GNSS fix
    Autonomous,
    /// Differentially corrected fix
    Differential,
    /// Dead reckoning estimate
    Estimated,
    /// Manually entered position
    Manual,
    /// Simulator output
    Simulated,
    /// No valid fix
    Invalid,
}

impl FixQuality {
    /// True for any fix the receiver marked as valid
    pub fn is_valid(&self) -> bool {
        !matches!(self, FixQuality::Invalid)
    }
}

/// One position report
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fix {
    /// Latitude in degrees, north positive
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive
    pub longitude_deg: f64,
    /// Speed over ground
    pub sample: SpeedSample,
    /// Positioning mode
    pub quality: FixQuality,
    /// Receive time (ms since boot)
    pub timestamp_ms: u32,
}

impl Fix {
    /// Distance to another fix in meters
    pub fn distance_to(&self, other: &Fix) -> f64 {
        super::geo::distance_m(
            self.latitude_deg,
            self.longitude_deg,
            other.latitude_deg,
            other.longitude_deg,
        )
    }

    /// Milliseconds since an earlier fix (wrap-safe)
    pub fn elapsed_since(&self, earlier: &Fix) -> u32 {
        self.timestamp_ms.wrapping_sub(earlier.timestamp_ms)
    }
}
