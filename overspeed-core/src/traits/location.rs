//! Location provider trait

use crate::location::{Fix, WatchOptions};

/// Answer to the location permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PermissionStatus {
    /// Prompt still open
    Undetermined,
    /// Access allowed
    Granted,
    /// Access refused
    Denied,
}

/// Errors that can occur with location access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LocationError {
    /// Permission not granted
    NotPermitted,
    /// A subscription is already open
    AlreadyWatching,
    /// Receiver not available
    Unavailable,
}

/// Handle to an open location subscription
///
/// Move-only: the only way to release it is
/// [`LocationProvider::clear_watch`], which consumes it.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use = "an open subscription must be released with clear_watch"]
pub struct Subscription {
    id: u8,
}

impl Subscription {
    /// Create a handle (for provider implementations)
    pub const fn new(id: u8) -> Self {
        Self { id }
    }

    /// Provider-assigned identifier
    pub fn id(&self) -> u8 {
        self.id
    }
}

/// Trait for permission-gated location sources
///
/// All methods are non-blocking; the session polls them from its loop.
pub trait LocationProvider {
    /// Ask for location access
    ///
    /// Returns `Undetermined` while the user has not answered. Must be
    /// `Granted` before any other method is used.
    fn request_permission(&mut self) -> PermissionStatus;

    /// Answer an on-device permission prompt
    ///
    /// Providers whose platform owns the prompt ignore this.
    fn respond_to_prompt(&mut self, _granted: bool) {}

    /// Poll for a single fix, ignoring watch options
    ///
    /// Returns `Ok(None)` until one is available.
    fn current_position(&mut self) -> Result<Option<Fix>, LocationError>;

    /// Open the continuous subscription
    fn watch_position(&mut self, options: &WatchOptions) -> Result<Subscription, LocationError>;

    /// Next fix delivered to the subscription, if any
    fn next_fix(&mut self, subscription: &Subscription) -> Option<Fix>;

    /// Close the subscription
    fn clear_watch(&mut self, subscription: Subscription);
}
