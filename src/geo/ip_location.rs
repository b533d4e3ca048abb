//! IP-based geolocation
//!
//! Asks ip-api.com where this machine is. Answers are cached on disk for an
//! hour so repeated CLI runs do not hit the rate-limited free endpoint.

use crate::config::defaults::APP_DIR_NAME;
use crate::constants::api::{IP_API_URL, IP_LOOKUP_TIMEOUT_SECS};
use crate::constants::cache::{IP_LOCATION_CACHE_FILE, IP_LOCATION_TTL_SECS};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::GeoLocation;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// ip-api.com reply
#[derive(Debug, Deserialize)]
struct IpApiReply {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    country: Option<String>,
}

impl IpApiReply {
    /// Check the reply and turn it into a validated location
    fn into_location(self) -> Result<GeoLocation> {
        if self.status != "success" {
            return Err(Error::Geo(format!("IP lookup status {:?}", self.status)));
        }

        let (Some(lat), Some(lon)) = (self.lat, self.lon) else {
            return Err(Error::Geo("IP lookup reply has no coordinates".to_string()));
        };
        let coords = Coordinates::new(lat, lon);
        coords
            .validate()
            .map_err(|e| Error::Geo(format!("IP location out of range: {}", e)))?;

        let parts: Vec<String> = [self.city, self.region_name, self.country]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();

        Ok(GeoLocation {
            coords,
            display_name: if parts.is_empty() {
                "Unknown Location".to_string()
            } else {
                parts.join(", ")
            },
        })
    }
}

/// On-disk cache entry
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    location: GeoLocation,
    cached_at: DateTime<Utc>,
}

/// JSON file holding the last successful lookup
#[derive(Debug, Clone)]
struct LocationCache {
    path: PathBuf,
}

impl LocationCache {
    fn ttl() -> Duration {
        Duration::seconds(IP_LOCATION_TTL_SECS as i64)
    }

    /// Cached location if one exists and is younger than the TTL at `now`
    fn read(&self, now: DateTime<Utc>) -> Option<GeoLocation> {
        let content = fs::read_to_string(&self.path).ok()?;
        let entry: CacheEntry = serde_json::from_str(&content).ok()?;

        if now.signed_duration_since(entry.cached_at) < Self::ttl() {
            Some(entry.location)
        } else {
            debug!("IP location cache at {} expired", self.path.display());
            None
        }
    }

    /// Best effort; a cache that cannot be written is skipped
    fn write(&self, location: &GeoLocation, now: DateTime<Utc>) {
        let entry = CacheEntry {
            location: location.clone(),
            cached_at: now,
        };

        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(&entry) {
            Ok(content) => {
                if let Err(e) = fs::write(&self.path, content) {
                    debug!("Could not write IP location cache: {}", e);
                }
            }
            Err(e) => debug!("Could not encode IP location cache: {}", e),
        }
    }

    fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// Device-location source backed by IP geolocation
#[derive(Debug)]
pub struct IpLocator {
    client: reqwest::Client,
    endpoint: String,
    cache: Option<LocationCache>,
}

impl IpLocator {
    /// Locator using the public endpoint and the user cache directory
    pub fn new() -> Self {
        let cache = dirs::cache_dir().map(|dir| LocationCache {
            path: dir.join(APP_DIR_NAME).join(IP_LOCATION_CACHE_FILE),
        });
        Self {
            cache,
            ..Self::without_cache()
        }
    }

    /// Locator caching to a specific file
    pub fn with_cache_path(path: PathBuf) -> Self {
        Self {
            cache: Some(LocationCache { path }),
            ..Self::without_cache()
        }
    }

    /// Locator that always asks the endpoint
    pub fn without_cache() -> Self {
        Self {
            client: lookup_client(std::time::Duration::from_secs(IP_LOOKUP_TIMEOUT_SECS)),
            endpoint: IP_API_URL.to_string(),
            cache: None,
        }
    }

    /// Give up on a lookup after `timeout`
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.client = lookup_client(timeout);
        self
    }

    /// Query a different geolocation endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Current location of this machine
    pub async fn locate(&self) -> Result<GeoLocation> {
        let now = Utc::now();
        if let Some(location) = self.cache.as_ref().and_then(|cache| cache.read(now)) {
            debug!("Using cached IP location {}", location.coords);
            return Ok(location);
        }

        let location = self.lookup().await?;
        if let Some(cache) = &self.cache {
            cache.write(&location, now);
        }
        Ok(location)
    }

    async fn lookup(&self) -> Result<GeoLocation> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| Error::Geo(format!("IP location request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Geo(format!("IP location API returned status: {}", status)));
        }

        let reply: IpApiReply = response
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse IP location response: {}", e)))?;

        reply.into_location()
    }

    /// Forget the cached location, if any
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }
}

/// A stalled lookup must fail so the caller falls back to the default point
fn lookup_client(timeout: std::time::Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            warn!("Failed to build IP lookup client with timeout: {}", e);
            reqwest::Client::new()
        })
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}
