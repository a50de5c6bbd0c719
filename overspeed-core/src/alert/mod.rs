//! Alert re-trigger policy

pub mod cooldown;

pub use cooldown::AlertCooldown;
