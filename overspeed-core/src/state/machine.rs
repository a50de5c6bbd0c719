//! State machine definition

use super::events::Event;

/// Screen lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Not yet mounted
    Boot,
    /// Waiting for the user to answer the location prompt
    RequestingPermission,
    /// Access granted, waiting for the one-shot position
    Locating,
    /// Subscription open, samples flowing
    Tracking,
    /// Stopped on an error; readouts stay at zero
    Error(ErrorKind),
    /// Torn down; no location activity
    Unmounted,
}

/// Types of errors that can occur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Location permission was not granted
    PermissionDenied,
    /// Location provider failed to open a subscription
    LocationUnavailable,
}

impl ErrorKind {
    /// User-visible message
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::PermissionDenied => "Permission to access location was denied",
            ErrorKind::LocationUnavailable => "Location is unavailable",
        }
    }
}

impl State {
    /// Check if no further location activity will happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Error(_) | State::Unmounted)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Boot, Mounted) => RequestingPermission,

            (RequestingPermission, PermissionGranted) => Locating,
            (RequestingPermission, PermissionDenied) => Error(ErrorKind::PermissionDenied),

            (Locating, FirstFix) => Tracking,
            (Locating, ProviderFailed) => Error(ErrorKind::LocationUnavailable),

            (Tracking, ProviderFailed) => Error(ErrorKind::LocationUnavailable),

            // Teardown from anywhere, including errors
            // `Unmounted` names both a state and an event
            (State::Unmounted, _) => State::Unmounted,
            (_, Event::Unmounted) => State::Unmounted,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let state = State::Boot.transition(Event::Mounted);
        assert_eq!(state, State::RequestingPermission);

        let state = state.transition(Event::PermissionGranted);
        assert_eq!(state, State::Locating);
        assert!(!state.is_terminal());

        let state = state.transition(Event::FirstFix);
        assert_eq!(state, State::Tracking);
    }

    #[test]
    fn test_permission_denied() {
        let state = State::RequestingPermission.transition(Event::PermissionDenied);
        assert_eq!(state, State::Error(ErrorKind::PermissionDenied));
        assert!(state.is_terminal());
    }

    #[test]
    fn test_error_is_sticky() {
        let state = State::Error(ErrorKind::PermissionDenied);
        assert_eq!(state.transition(Event::PermissionGranted), state);
        assert_eq!(state.transition(Event::FirstFix), state);
        assert_eq!(state.transition(Event::Mounted), state);
    }

    #[test]
    fn test_unmount_from_any_state() {
        let states = [
            State::Boot,
            State::RequestingPermission,
            State::Locating,
            State::Tracking,
            State::Error(ErrorKind::PermissionDenied),
        ];

        for state in states {
            assert_eq!(state.transition(Event::Unmounted), State::Unmounted);
        }
    }

    #[test]
    fn test_unmounted_ignores_events() {
        let state = State::Unmounted;
        assert!(state.is_terminal());
        assert_eq!(state.transition(Event::Mounted), State::Unmounted);
        assert_eq!(state.transition(Event::PermissionGranted), State::Unmounted);
    }

    #[test]
    fn test_provider_failure() {
        assert_eq!(
            State::Locating.transition(Event::ProviderFailed),
            State::Error(ErrorKind::LocationUnavailable)
        );
        assert_eq!(
            State::Tracking.transition(Event::ProviderFailed),
            State::Error(ErrorKind::LocationUnavailable)
        );
    }

    #[test]
    fn test_fix_ignored_before_permission() {
        assert_eq!(
            State::RequestingPermission.transition(Event::FirstFix),
            State::RequestingPermission
        );
    }
}
