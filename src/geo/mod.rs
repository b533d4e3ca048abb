//! Device location
//!
//! Resolves the user's physical position. The only positioning source
//! available to a terminal or server process is IP geolocation.

pub mod ip_location;

pub use ip_location::IpLocator;

use crate::coord::Coordinates;
use crate::location::LocationState;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A located position with a human-readable name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoLocation {
    pub coords: Coordinates,
    /// Display name (city, region, country)
    pub display_name: String,
}

/// Run one device resolution attempt and record its outcome
///
/// Success feeds `resolve_device`; any failure is logged and falls back
/// through `resolve_device_failed`, so the active point is always set
/// afterwards.
pub async fn resolve_device_location(state: &mut LocationState, locator: &IpLocator) {
    match locator.locate().await {
        Ok(location) => {
            info!("Device location: {} {}", location.display_name, location.coords);
            state.resolve_device(location.coords);
        }
        Err(e) => {
            warn!("Error getting location: {}", e);
            state.resolve_device_failed();
        }
    }
}

/// Initialize location state, optionally trying device resolution
pub async fn initialize_location(use_device: bool, locator: &IpLocator) -> LocationState {
    let mut state = LocationState::new();
    if use_device {
        resolve_device_location(&mut state, locator).await;
    } else {
        state.resolve_device_failed();
    }
    state
}
