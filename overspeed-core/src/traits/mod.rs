//! Collaborator traits
//!
//! These traits define the interface between the session logic and the
//! hardware-specific location, audio, and display implementations.

pub mod audio;
pub mod location;
pub mod view;

pub use audio::AudioAlerter;
pub use location::{LocationError, LocationProvider, PermissionStatus, Subscription};
pub use view::{ScreenView, ViewFrame};
