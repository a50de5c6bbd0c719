//! Speed evaluator
//!
//! Pure function from (sample, threshold) to the display model. Holds no
//! state, so calling it twice with the same inputs yields identical output.

use core::fmt::Write;

use heapless::String;

use super::sample::SpeedSample;
use super::threshold::{Threshold, ThresholdInput};
use crate::config::{AlertConfig, InvalidThresholdPolicy, DEFAULT_THRESHOLD_KMH};

/// Maximum characters in a formatted readout
///
/// Fits any speed a GPS receiver reports with both decimals. Values too wide
/// for it (magnitude of 1e9 or more) show as `----` instead.
pub const READOUT_LEN: usize = 12;

/// Formatted speed value
pub type Readout = String<READOUT_LEN>;

/// Shown when a value does not fit in a readout
const OVERFLOW_TEXT: &str = "----";

/// What the screen shows for one evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayModel {
    /// Speed in m/s, two decimals
    pub meters_per_second: Readout,
    /// Speed in km/h, two decimals
    pub kilometers_per_hour: Readout,
    /// Current speed exceeds the effective threshold
    pub alert_active: bool,
}

impl DisplayModel {
    /// Readout before any sample has arrived
    pub fn idle() -> Self {
        Self {
            meters_per_second: fixed2(0.0),
            kilometers_per_hour: fixed2(0.0),
            alert_active: false,
        }
    }
}

impl Default for DisplayModel {
    fn default() -> Self {
        Self::idle()
    }
}

/// Evaluate a sample against an already resolved threshold
pub fn evaluate(sample: SpeedSample, threshold: Threshold) -> DisplayModel {
    let kmh = sample.kilometers_per_hour();

    DisplayModel {
        meters_per_second: fixed2(sample.meters_per_second),
        kilometers_per_hour: fixed2(kmh),
        alert_active: threshold.is_exceeded_by(kmh),
    }
}

/// Format with exactly two decimals, ties rounded away from zero
fn fixed2(value: f32) -> Readout {
    // `{:.2}` alone rounds exact ties to even (0.125 → "0.12")
    let rounded = libm::round(value as f64 * 100.0) / 100.0;

    let mut out = Readout::new();
    if write!(out, "{:.2}", rounded).is_err() {
        out.clear();
        let _ = out.push_str(OVERFLOW_TEXT);
    }
    out
}

/// Evaluator bound to the configured default and invalid-input policy
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedEvaluator {
    default_kmh: f32,
    policy: InvalidThresholdPolicy,
}

impl Default for SpeedEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_KMH, InvalidThresholdPolicy::default())
    }
}

impl SpeedEvaluator {
    /// Create an evaluator
    pub const fn new(default_kmh: f32, policy: InvalidThresholdPolicy) -> Self {
        Self {
            default_kmh,
            policy,
        }
    }

    /// Create an evaluator from the alert section of the configuration
    pub fn from_config(config: &AlertConfig) -> Self {
        Self::new(config.default_threshold_kmh, config.invalid_threshold)
    }

    /// Default threshold used for an empty field (km/h)
    pub fn default_kmh(&self) -> f32 {
        self.default_kmh
    }

    /// Resolve the raw threshold text
    pub fn resolve(&self, input: &ThresholdInput) -> Threshold {
        input.resolve(self.default_kmh, self.policy)
    }

    /// Evaluate a sample against the raw threshold text
    pub fn evaluate(&self, sample: SpeedSample, input: &ThresholdInput) -> DisplayModel {
        evaluate(sample, self.resolve(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn eval(mps: f32, threshold: &str) -> DisplayModel {
        let input = ThresholdInput::from_text(threshold).unwrap();
        SpeedEvaluator::default().evaluate(SpeedSample::new(mps), &input)
    }

    #[test]
    fn test_below_threshold() {
        let model = eval(20.0, "80");
        assert_eq!(model.meters_per_second.as_str(), "20.00");
        assert_eq!(model.kilometers_per_hour.as_str(), "72.00");
        assert!(!model.alert_active);
    }

    #[test]
    fn test_above_threshold() {
        let model = eval(15.0, "50");
        assert_eq!(model.kilometers_per_hour.as_str(), "54.00");
        assert!(model.alert_active);
    }

    #[test]
    fn test_boundary_is_not_alert() {
        // 13.888 m/s is 49.9968 km/h, shown as 50.00
        let model = eval(13.888, "50");
        assert_eq!(model.kilometers_per_hour.as_str(), "50.00");
        assert!(!model.alert_active);
    }

    #[test]
    fn test_empty_threshold_uses_default() {
        assert!(eval(15.0, "").alert_active);
        assert!(!eval(13.0, "").alert_active);

        let evaluator = SpeedEvaluator::default();
        let input = ThresholdInput::new();
        assert_eq!(evaluator.resolve(&input), Threshold::Default(50.0));
    }

    #[test]
    fn test_non_numeric_suppresses_alert() {
        assert!(!eval(100.0, "5.5.5").alert_active);
    }

    #[test]
    fn test_non_numeric_with_default_policy() {
        let evaluator = SpeedEvaluator::new(50.0, InvalidThresholdPolicy::UseDefault);
        let input = ThresholdInput::from_text(".").unwrap();
        assert!(evaluator.evaluate(SpeedSample::new(15.0), &input).alert_active);
    }

    #[test]
    fn test_unavailable_speed() {
        let model = evaluate(SpeedSample::unavailable(), Threshold::Value(0.0));
        assert_eq!(model.meters_per_second.as_str(), "NaN");
        assert_eq!(model.kilometers_per_hour.as_str(), "NaN");
        assert!(!model.alert_active);
    }

    #[test]
    fn test_negative_speed() {
        let model = evaluate(SpeedSample::new(-1.0), Threshold::Value(0.0));
        assert_eq!(model.meters_per_second.as_str(), "-1.00");
        assert_eq!(model.kilometers_per_hour.as_str(), "-3.60");
        assert!(!model.alert_active);
    }

    #[test]
    fn test_negative_speed_compares_numerically() {
        // -72 km/h is above a -100 km/h limit
        let model = evaluate(SpeedSample::new(-20.0), Threshold::Value(-100.0));
        assert_eq!(model.kilometers_per_hour.as_str(), "-72.00");
        assert!(model.alert_active);
    }

    #[test]
    fn test_ties_round_up() {
        let model = evaluate(SpeedSample::new(0.125), Threshold::Value(50.0));
        assert_eq!(model.meters_per_second.as_str(), "0.13");

        let model = evaluate(SpeedSample::new(10.125), Threshold::Value(50.0));
        assert_eq!(model.meters_per_second.as_str(), "10.13");

        let model = evaluate(SpeedSample::new(-0.125), Threshold::Value(50.0));
        assert_eq!(model.meters_per_second.as_str(), "-0.13");
    }

    #[test]
    fn test_idle_model() {
        let model = DisplayModel::idle();
        assert_eq!(model.meters_per_second.as_str(), "0.00");
        assert_eq!(model.kilometers_per_hour.as_str(), "0.00");
        assert!(!model.alert_active);
    }

    #[test]
    fn test_overflow_readout() {
        let model = evaluate(SpeedSample::new(f32::MAX), Threshold::Value(50.0));
        assert_eq!(model.meters_per_second.as_str(), OVERFLOW_TEXT);
        assert!(model.alert_active);
    }

    proptest! {
        #[test]
        fn prop_kmh_is_mps_times_3_6(mps in 0.0f32..500.0) {
            let model = evaluate(SpeedSample::new(mps), Threshold::Default(50.0));
            let shown: f32 = model.kilometers_per_hour.parse().unwrap();
            prop_assert!((shown - mps * 3.6).abs() <= 0.0051);

            let dot = model.kilometers_per_hour.find('.').unwrap();
            prop_assert_eq!(model.kilometers_per_hour.len() - dot - 1, 2);
        }

        #[test]
        fn prop_evaluate_is_idempotent(mps in -10.0f32..500.0, limit in 0.0f32..300.0) {
            let first = evaluate(SpeedSample::new(mps), Threshold::Value(limit));
            let second = evaluate(SpeedSample::new(mps), Threshold::Value(limit));
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_alert_iff_strictly_above(mps in 0.0f32..100.0, limit in 0.0f32..300.0) {
            let model = evaluate(SpeedSample::new(mps), Threshold::Value(limit));
            prop_assert_eq!(model.alert_active, mps * 3.6 > limit);
        }
    }
}
