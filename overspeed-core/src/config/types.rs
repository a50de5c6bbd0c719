//! Configuration type definitions

use heapless::String;

use crate::location::{Accuracy, WatchOptions};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Threshold used when the field is empty (km/h)
pub const DEFAULT_THRESHOLD_KMH: f32 = 50.0;

/// Maximum title length (one display row)
pub const MAX_TITLE_LEN: usize = 21;

/// Default GPS receiver baud rate
pub const DEFAULT_GPS_BAUD: u32 = 9600;

/// What to do with threshold text that is not a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InvalidThresholdPolicy {
    /// Treat as an impossible comparison: no alert while the text is invalid
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "suppress"))]
    SuppressAlert,
    /// Fall back to the default threshold
    #[cfg_attr(feature = "serde", serde(rename = "default"))]
    UseDefault,
}

/// How location access is granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Consent {
    /// Ask on the display at every power-up
    #[default]
    Prompt,
    /// Pre-granted, no prompt
    Granted,
}

/// Alert configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AlertConfig {
    /// Threshold for an empty field (km/h)
    pub default_threshold_kmh: f32,
    /// Minimum time between two alert clips (0 = every alerting sample)
    pub cooldown_ms: u32,
    /// Handling of non-numeric threshold text
    pub invalid_threshold: InvalidThresholdPolicy,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            default_threshold_kmh: DEFAULT_THRESHOLD_KMH,
            cooldown_ms: 0,
            invalid_threshold: InvalidThresholdPolicy::SuppressAlert,
        }
    }
}

/// Location configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LocationConfig {
    /// Permission mode
    pub consent: Consent,
    /// Minimum fix quality
    pub accuracy: Accuracy,
    /// Minimum movement between delivered fixes (meters)
    pub distance_interval_m: f32,
    /// Minimum time between delivered fixes (ms)
    pub time_interval_ms: u32,
}

impl Default for LocationConfig {
    fn default() -> Self {
        let watch = WatchOptions::default();
        Self {
            consent: Consent::Prompt,
            accuracy: watch.accuracy,
            distance_interval_m: watch.distance_interval_m,
            time_interval_ms: watch.time_interval_ms,
        }
    }
}

impl LocationConfig {
    /// Subscription options derived from this section
    pub fn watch_options(&self) -> WatchOptions {
        WatchOptions {
            accuracy: self.accuracy,
            distance_interval_m: self.distance_interval_m,
            time_interval_ms: self.time_interval_ms,
        }
    }
}

/// GPS receiver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GpsConfig {
    /// UART baud rate
    pub baud: u32,
}

impl Default for GpsConfig {
    fn default() -> Self {
        Self {
            baud: DEFAULT_GPS_BAUD,
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Title on the first row
    pub title: String<MAX_TITLE_LEN>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let mut title = String::new();
        let _ = title.push_str("OVERSPEED");
        Self { title }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverspeedConfig {
    pub alert: AlertConfig,
    pub location: LocationConfig,
    pub gps: GpsConfig,
    pub display: DisplayConfig,
}

impl OverspeedConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }
}
