//! Map view feed
//!
//! Computes what the map surface is told to draw: where to center, at
//! which zoom, and which markers to place. Rendering, panning and click
//! handling belong to the map surface itself.

use crate::constants::map::DEFAULT_ZOOM;
use crate::coord::Coordinates;
use crate::location::LocationState;
use crate::search::{SiteId, SiteResult};
use serde::{Deserialize, Serialize};

/// Kind of marker on the map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerKind {
    /// The user's physical position
    Device,
    /// The center of the search, when it differs from the device position
    SearchPoint,
    /// A search result
    Site { id: SiteId, title: String },
}

/// A marker placed on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(flatten)]
    pub kind: MarkerKind,
    pub position: Coordinates,
    /// Distance from the search point, rounded to 2 decimals (sites only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// Everything the map view needs for one render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapFrame {
    pub center: Coordinates,
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

impl MapFrame {
    /// Build the frame for the current location state and results
    pub fn build(state: &LocationState, results: &[SiteResult]) -> Self {
        let mut markers = Vec::with_capacity(results.len() + 2);

        let device = state.device_location();
        if let Some(position) = device {
            markers.push(Marker {
                kind: MarkerKind::Device,
                position,
                distance_km: None,
            });
        }

        if let Some(active) = state.active_search_point() {
            if device != Some(active) {
                markers.push(Marker {
                    kind: MarkerKind::SearchPoint,
                    position: active,
                    distance_km: None,
                });
            }
        }

        markers.extend(results.iter().map(|site| Marker {
            kind: MarkerKind::Site {
                id: site.id.clone(),
                title: site.title.clone(),
            },
            position: site.location,
            distance_km: Some(site.display_distance_km()),
        }));

        Self {
            center: state.display_point(),
            zoom: DEFAULT_ZOOM,
            markers,
        }
    }
}
