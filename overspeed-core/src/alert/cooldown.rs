//! Alert cooldown
//!
//! Decides whether an alerting evaluation should start the alert clip.
//! With a zero window every alerting evaluation plays the clip, which can
//! stack clips on rapid updates. A non-zero window suppresses re-triggers
//! until it has elapsed since the last clip that actually played.

/// Cooldown gate for the audio alert
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertCooldown {
    /// Window in ms (0 = no suppression)
    window_ms: u32,
    /// Time of the last clip that was allowed (ms)
    last_trigger_ms: Option<u32>,
    /// Triggers suppressed since the last allowed one
    suppressed: u32,
}

impl AlertCooldown {
    /// Create a gate with the given window
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_trigger_ms: None,
            suppressed: 0,
        }
    }

    /// Window length in ms
    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }

    /// Ask to play the clip at `now_ms`
    ///
    /// Returns true if the clip should start. Records the trigger when it does.
    pub fn try_trigger(&mut self, now_ms: u32) -> bool {
        if self.window_ms > 0 {
            if let Some(last) = self.last_trigger_ms {
                if now_ms.wrapping_sub(last) < self.window_ms {
                    self.suppressed = self.suppressed.saturating_add(1);
                    return false;
                }
            }
        }

        self.last_trigger_ms = Some(now_ms);
        self.suppressed = 0;
        true
    }

    /// Number of triggers dropped since the last clip played
    pub fn suppressed(&self) -> u32 {
        self.suppressed
    }

    /// Forget the last trigger
    pub fn reset(&mut self) {
        self.last_trigger_ms = None;
        self.suppressed = 0;
    }
}

impl Default for AlertCooldown {
    fn default() -> Self {
        Self::new(0)
    }
}
