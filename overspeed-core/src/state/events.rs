//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Lifecycle events
    /// Screen mounted, start asking for location access
    Mounted,
    /// Screen torn down
    Unmounted,

    // Permission events
    /// User allowed location access
    PermissionGranted,
    /// User refused location access
    PermissionDenied,

    // Location events
    /// One-shot position arrived, subscription may open
    FirstFix,
    /// Location provider could not serve the request
    ProviderFailed,
}
