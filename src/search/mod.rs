//! Search dispatch
//!
//! This module handles:
//! - Validating and normalizing user-entered search parameters
//! - Posting the request to the search API through a [`Transport`]
//! - Parsing the reply into [`RawSite`]s ([`response`])
//! - Attaching distances for display ([`annotate`])
//!
//! The coordinator holds no state between calls: it reads the active
//! search point fresh for every dispatch and never annotates results
//! itself, since the active point may move while a request is in flight.

pub mod annotate;
pub mod response;
pub mod transport;

pub use annotate::{annotate, sort_by_distance, SiteResult};
pub use response::{parse_sites, RawSite, SiteId};
pub use transport::{HttpTransport, Transport};

use crate::config::Config;
use crate::constants::search::{DEFAULT_LIMIT, DEFAULT_RADIUS_KM, MAX_LIMIT, MIN_LIMIT};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::location::LocationState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// A search request exactly as sent on the wire
///
/// Built only through [`SearchRequest::build`], never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query_text: String,
    pub limit: u32,
    #[serde(flatten)]
    pub center: Coordinates,
    pub radius_meter: f64,
}

impl SearchRequest {
    /// Validate user input and build a request
    ///
    /// Checks run in order and the first failure wins:
    /// 1. the trimmed query must not be empty
    /// 2. an unusable limit becomes 5 (limits outside 1..=50 included)
    /// 3. an unusable radius becomes 10 km (non-positive included)
    /// 4. the center must already be resolved
    ///
    /// The radius is entered in kilometers and sent in meters.
    pub fn build(
        center: Option<Coordinates>,
        query_text: &str,
        limit: &str,
        radius_km: &str,
    ) -> Result<Self> {
        let query_text = query_text.trim();
        if query_text.is_empty() {
            return Err(Error::EmptyQuery);
        }

        let limit = coerce_limit(limit);
        let radius_km = coerce_radius_km(radius_km);
        let center = center.ok_or(Error::LocationUnresolved)?;

        Ok(Self {
            query_text: query_text.to_string(),
            limit,
            center,
            radius_meter: radius_km * 1000.0,
        })
    }

    /// Search radius in kilometers
    pub fn radius_km(&self) -> f64 {
        self.radius_meter / 1000.0
    }
}

fn coerce_limit(text: &str) -> u32 {
    match text.trim().parse::<u32>() {
        Ok(limit) if (MIN_LIMIT..=MAX_LIMIT).contains(&limit) => limit,
        _ => {
            debug!("Result limit {:?} unusable, using {}", text, DEFAULT_LIMIT);
            DEFAULT_LIMIT
        }
    }
}

fn coerce_radius_km(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(radius) if radius.is_finite() && radius > 0.0 => radius,
        _ => {
            debug!("Radius {:?} unusable, using {} km", text, DEFAULT_RADIUS_KM);
            DEFAULT_RADIUS_KM
        }
    }
}

/// Issues search requests against the configured query endpoint
#[derive(Debug, Clone)]
pub struct SearchCoordinator<T: Transport> {
    transport: T,
    query_url: String,
}

impl<T: Transport> SearchCoordinator<T> {
    /// Create a coordinator posting to `query_url`
    pub fn new(transport: T, query_url: impl Into<String>) -> Self {
        Self {
            transport,
            query_url: query_url.into(),
        }
    }

    /// Create a coordinator for the query endpoint of a resolved config
    pub fn from_config(transport: T, config: &Config) -> Result<Self> {
        Ok(Self::new(transport, config.api_url("query")?))
    }

    /// URL requests are posted to
    pub fn query_url(&self) -> &str {
        &self.query_url
    }

    /// Validate input against the current location and run one search
    ///
    /// Returns the sites in server order without distances.
    pub async fn dispatch(
        &self,
        location: &LocationState,
        query_text: &str,
        limit: &str,
        radius_km: &str,
    ) -> Result<Vec<RawSite>> {
        let request =
            SearchRequest::build(location.active_search_point(), query_text, limit, radius_km)?;
        self.send(&request).await
    }

    /// Send an already-built request
    pub async fn send(&self, request: &SearchRequest) -> Result<Vec<RawSite>> {
        info!(
            "Searching {:?} within {} km of {} (limit {})",
            request.query_text,
            request.radius_km(),
            request.center,
            request.limit
        );

        let body = serde_json::to_value(request)?;
        let reply = self.transport.post(&self.query_url, &body).await?;
        let sites = parse_sites(reply)?;

        info!("Search returned {} sites", sites.len());
        Ok(sites)
    }
}

impl SearchCoordinator<HttpTransport> {
    /// Create an HTTP coordinator from a resolved config
    pub fn http(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(Duration::from_secs(config.api.timeout_secs))?;
        Self::from_config(transport, config)
    }
}

/// One completed search cycle, ready for output
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub request: SearchRequest,
    pub center: Coordinates,
    pub results: Vec<SiteResult>,
    pub searched_at: DateTime<Utc>,
}

impl SearchReport {
    /// Annotate raw sites against `center` and stamp the report
    pub fn new(request: SearchRequest, center: Coordinates, sites: &[RawSite]) -> Self {
        Self {
            request,
            center,
            results: annotate(sites, center),
            searched_at: Utc::now(),
        }
    }
}
