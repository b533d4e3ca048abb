//! Geographic coordinates
//!
//! This module handles:
//! - The `Coordinates` value type shared by every location-bearing entity
//! - Range validation for untrusted input
//! - Great-circle distance (see [`distance`])

pub mod distance;

use crate::constants::geo::{FALLBACK_LAT, FALLBACK_LON};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude) in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// The built-in search point used when no device location is known
    pub fn fallback() -> Self {
        Self::new(FALLBACK_LAT, FALLBACK_LON)
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::CoordinateOutOfRange(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(Error::CoordinateOutOfRange(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lon
            )));
        }
        Ok(())
    }

    /// Parse free-text latitude and longitude, then validate their range
    ///
    /// Text that is not a finite number fails with `InvalidCoordinateFormat`;
    /// numbers outside the valid ranges fail with `CoordinateOutOfRange`.
    pub fn parse(lat_text: &str, lon_text: &str) -> Result<Self> {
        let lat = parse_degrees(lat_text, "latitude")?;
        let lon = parse_degrees(lon_text, "longitude")?;
        let coords = Self::new(lat, lon);
        coords.validate()?;
        Ok(coords)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

fn parse_degrees(text: &str, axis: &str) -> Result<f64> {
    let value: f64 = text.trim().parse().map_err(|_| {
        Error::InvalidCoordinateFormat(format!("Invalid {}: {:?}", axis, text))
    })?;
    if !value.is_finite() {
        return Err(Error::InvalidCoordinateFormat(format!(
            "Invalid {}: {:?}",
            axis, text
        )));
    }
    Ok(value)
}
