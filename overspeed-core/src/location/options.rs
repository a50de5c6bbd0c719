//! Location subscription options

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::fix::FixQuality;

/// Requested accuracy level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Accuracy {
    /// Any fix marked valid
    Low,
    /// Satellite fixes and dead reckoning estimates
    Balanced,
    /// Satellite fixes only (autonomous or differential)
    #[default]
    High,
}

impl Accuracy {
    /// Check whether a fix of the given quality satisfies this level
    pub fn accepts(&self, quality: FixQuality) -> bool {
        match self {
            Accuracy::Low => quality.is_valid(),
            Accuracy::Balanced => matches!(
                quality,
                FixQuality::Autonomous | FixQuality::Differential | FixQuality::Estimated
            ),
            Accuracy::High => matches!(quality, FixQuality::Autonomous | FixQuality::Differential),
        }
    }
}

/// Options for a continuous location subscription
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchOptions {
    /// Minimum fix quality
    pub accuracy: Accuracy,
    /// Minimum movement between delivered fixes (meters)
    pub distance_interval_m: f32,
    /// Minimum time between delivered fixes (ms)
    pub time_interval_ms: u32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            accuracy: Accuracy::High,
            distance_interval_m: 1.0,
            time_interval_ms: 5,
        }
    }
}
