//! site-explorer: find geo-tagged sites near a point on the map
//!
//! A library and CLI tool that keeps track of where a search should be
//! centered, sends radius-limited queries to a search backend and
//! annotates each hit with its great-circle distance from the center.
//!
//! ## Features
//!
//! - Device location via IP geolocation, with a fixed fallback point
//! - Search point from map clicks or validated manual entry
//! - Relevance-ranked results annotated with haversine distance
//! - Text, JSON, GPX and map URL output
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use site_explorer::coord::{distance::distance_km, Coordinates};
//! use site_explorer::location::LocationState;
//!
//! let mut location = LocationState::new();
//! location.resolve_device(Coordinates::new(28.6139, 77.2090)); // New Delhi
//! location.set_search_point_from_map_click(Coordinates::new(28.7041, 77.1025));
//!
//! let device = location.device_location().unwrap();
//! let center = location.active_search_point().unwrap();
//! println!("Search point is {:.2} km away", distance_km(device, center));
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod location;
pub mod map;
pub mod search;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use location::LocationState;
pub use search::{SearchCoordinator, SearchRequest, SiteResult};
