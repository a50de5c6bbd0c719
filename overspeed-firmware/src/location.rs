//! GPS-backed location provider
//!
//! Bridges the session's `LocationProvider` to the fix channel filled by
//! the GPS receive task. Permission comes from the configured consent mode
//! or from the on-display prompt.

use defmt::*;
use portable_atomic::Ordering;

use overspeed_core::config::Consent;
use overspeed_core::location::{Fix, SampleGate, WatchOptions};
use overspeed_core::traits::{LocationError, LocationProvider, PermissionStatus, Subscription};

use crate::channels::{FIX_CHANNEL, GPS_ENABLED};

/// Location provider over the GPS receive task
pub struct GpsLocation {
    consent: Consent,
    /// Prompt answer, `None` until the user responds
    answer: Option<bool>,
    gate: SampleGate,
    /// Id of the open subscription
    watching: Option<u8>,
    next_id: u8,
}

impl GpsLocation {
    pub fn new(consent: Consent) -> Self {
        Self {
            consent,
            answer: None,
            gate: SampleGate::new(WatchOptions::default()),
            watching: None,
            next_id: 1,
        }
    }

    fn permitted(&self) -> bool {
        self.request_status() == PermissionStatus::Granted
    }

    fn request_status(&self) -> PermissionStatus {
        match (self.consent, self.answer) {
            (Consent::Granted, _) => PermissionStatus::Granted,
            (Consent::Prompt, Some(true)) => PermissionStatus::Granted,
            (Consent::Prompt, Some(false)) => PermissionStatus::Denied,
            (Consent::Prompt, None) => PermissionStatus::Undetermined,
        }
    }

    fn set_receiver(&self, enabled: bool) {
        if GPS_ENABLED.swap(enabled, Ordering::Relaxed) != enabled {
            info!("GPS forwarding {}", if enabled { "on" } else { "off" });
        }
    }
}

/// Discard queued fixes
fn drain_fixes() {
    while FIX_CHANNEL.try_receive().is_ok() {}
}

impl LocationProvider for GpsLocation {
    fn request_permission(&mut self) -> PermissionStatus {
        self.request_status()
    }

    fn respond_to_prompt(&mut self, granted: bool) {
        if self.consent == Consent::Prompt && self.answer.is_none() {
            info!("Location access {}", if granted { "allowed" } else { "denied" });
            self.answer = Some(granted);
        }
    }

    fn current_position(&mut self) -> Result<Option<Fix>, LocationError> {
        if !self.permitted() {
            return Err(LocationError::NotPermitted);
        }

        self.set_receiver(true);
        while let Ok(fix) = FIX_CHANNEL.try_receive() {
            if fix.quality.is_valid() {
                return Ok(Some(fix));
            }
        }
        Ok(None)
    }

    fn watch_position(&mut self, options: &WatchOptions) -> Result<Subscription, LocationError> {
        if !self.permitted() {
            return Err(LocationError::NotPermitted);
        }
        if self.watching.is_some() {
            return Err(LocationError::AlreadyWatching);
        }

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.gate = SampleGate::new(*options);
        self.watching = Some(id);
        self.set_receiver(true);

        debug!("Watch {} opened", id);
        Ok(Subscription::new(id))
    }

    fn next_fix(&mut self, subscription: &Subscription) -> Option<Fix> {
        if self.watching != Some(subscription.id()) {
            return None;
        }

        while let Ok(fix) = FIX_CHANNEL.try_receive() {
            if self.gate.admit(&fix) {
                return Some(fix);
            }
        }
        None
    }

    fn clear_watch(&mut self, subscription: Subscription) {
        if self.watching != Some(subscription.id()) {
            warn!("Clearing unknown watch {}", subscription.id());
            return;
        }

        self.watching = None;
        self.gate.reset();
        self.set_receiver(false);
        drain_fixes();
        debug!("Watch {} cleared", subscription.id());
    }
}
