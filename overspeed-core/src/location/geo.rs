//! Great-circle distance

use core::f64::consts::PI;

use crate::units::EARTH_RADIUS_M;

fn radians(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Haversine distance between two WGS-84 coordinates, in meters
pub fn distance_m(lat1_deg: f64, lon1_deg: f64, lat2_deg: f64, lon2_deg: f64) -> f64 {
    let phi1 = radians(lat1_deg);
    let phi2 = radians(lat2_deg);
    let d_phi = radians(lat2_deg - lat1_deg);
    let d_lambda = radians(lon2_deg - lon1_deg);

    let s_phi = libm::sin(d_phi / 2.0);
    let s_lambda = libm::sin(d_lambda / 2.0);
    let a = s_phi * s_phi + libm::cos(phi1) * libm::cos(phi2) * s_lambda * s_lambda;

    // Rounding can push `a` just outside [0, 1] for antipodal points
    let a = a.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_M * libm::asin(libm::sqrt(a))
}
