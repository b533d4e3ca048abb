//! Great-circle distance
//!
//! Haversine distance on a sphere of radius 6371 km. Any real-valued
//! lat/lon pair is accepted; range validation belongs to the callers that
//! take untrusted input.

use crate::constants::geo::EARTH_RADIUS_KM;
use crate::coord::Coordinates;

/// Distance between two points in kilometers (full precision)
///
/// # Algorithm
/// - h = sin²(Δlat/2) + cos(lat_a)·cos(lat_b)·sin²(Δlon/2)
/// - d = 2R·atan2(√h, √(1−h))
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    // rounding can push h just past 1 for antipodal pairs
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Round a distance to 2 decimal places for display
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

/// Distance between two points rounded for display
pub fn display_distance_km(a: Coordinates, b: Coordinates) -> f64 {
    round_km(distance_km(a, b))
}
