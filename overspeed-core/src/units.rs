//! Unit conversion constants
//!
//! Speeds are carried in meters per second internally. The only other unit
//! shown to the user is kilometers per hour.

/// m/s → km/h
pub const MPS_TO_KMH: f32 = 3.6;

/// knots → m/s (NMEA reports speed over ground in knots)
pub const KNOTS_TO_MPS: f32 = 0.514_444;

/// Mean Earth radius used for great-circle distances
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Convert meters per second to kilometers per hour
#[inline]
pub fn mps_to_kmh(mps: f32) -> f32 {
    mps * MPS_TO_KMH
}

/// Convert knots to meters per second
#[inline]
pub fn knots_to_mps(knots: f32) -> f32 {
    knots * KNOTS_TO_MPS
}
