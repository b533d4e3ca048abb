//! Centralized constants for the site-explorer crate
//!
//! Values shared by several modules live here so they stay consistent.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers
    pub const EARTH_RADIUS_KM: f64 = 6371.0;

    /// Latitude of the fallback search point (Delhi)
    pub const FALLBACK_LAT: f64 = 28.7041;

    /// Longitude of the fallback search point (Delhi)
    pub const FALLBACK_LON: f64 = 77.1025;
}

/// Search parameter defaults and bounds
pub mod search {
    /// Result limit used when the entered value is unusable
    pub const DEFAULT_LIMIT: u32 = 5;

    /// Smallest accepted result limit
    pub const MIN_LIMIT: u32 = 1;

    /// Largest accepted result limit
    pub const MAX_LIMIT: u32 = 50;

    /// Radius in kilometers used when the entered value is unusable
    pub const DEFAULT_RADIUS_KM: f64 = 10.0;

    /// Characters of body text shown in result excerpts
    pub const EXCERPT_CHARS: usize = 100;
}

/// Map display settings
pub mod map {
    /// Zoom level the map view is shown at
    pub const DEFAULT_ZOOM: u8 = 10;
}

/// External API endpoints
pub mod api {
    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";

    /// IP geolocation request timeout in seconds
    pub const IP_LOOKUP_TIMEOUT_SECS: u64 = 5;
}

/// Cache settings
pub mod cache {
    /// IP location cache duration in seconds (1 hour)
    pub const IP_LOCATION_TTL_SECS: u64 = 3600;

    /// IP location cache file name
    pub const IP_LOCATION_CACHE_FILE: &str = "ip_location_cache.json";
}
