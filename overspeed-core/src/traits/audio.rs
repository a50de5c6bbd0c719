//! Audio alert trait

/// Plays the fixed alert clip
///
/// Playback is fire-and-forget: the call returns as soon as playback has
/// been requested. Implementations log playback failures and never report
/// them back to the caller.
pub trait AudioAlerter {
    /// Start the alert clip
    fn play_alert(&mut self);
}
