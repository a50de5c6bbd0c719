//! Watch option filter
//!
//! Applies the subscription options to the raw fix stream: a fix is
//! delivered only when it meets the accuracy level and has moved far enough,
//! and enough time has passed, since the last delivered fix.

use super::fix::Fix;
use super::options::WatchOptions;

/// Filter that enforces [`WatchOptions`] on a stream of fixes
#[derive(Debug, Clone)]
pub struct SampleGate {
    options: WatchOptions,
    last: Option<Fix>,
}

impl SampleGate {
    /// Create a gate with no delivered fix yet
    pub fn new(options: WatchOptions) -> Self {
        Self {
            options,
            last: None,
        }
    }

    /// Active options
    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    /// Forget the last delivered fix (next qualifying fix always passes)
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Decide whether to deliver a fix, remembering it if so
    pub fn admit(&mut self, fix: &Fix) -> bool {
        if !self.options.accuracy.accepts(fix.quality) {
            return false;
        }

        if let Some(last) = &self.last {
            if fix.elapsed_since(last) < self.options.time_interval_ms {
                return false;
            }
            if fix.distance_to(last) < f64::from(self.options.distance_interval_m) {
                return false;
            }
        }

        self.last = Some(*fix);
        true
    }
}
