//! Server shared state
//!
//! Holds the resolved configuration, the session's location state and the
//! most recent search results.

use crate::config::Config;
use crate::error::Result;
use crate::location::LocationState;
use crate::search::{annotate, HttpTransport, RawSite, SearchCoordinator, SiteResult};
use tokio::sync::RwLock;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration, fixed at startup
    pub config: Config,

    /// Search dispatcher for the configured API
    pub coordinator: SearchCoordinator<HttpTransport>,

    /// Device location, active search point and manual draft
    pub location: RwLock<LocationState>,

    /// Sites from the last search to complete
    results: RwLock<Vec<RawSite>>,
}

impl AppState {
    /// Create application state around an initialized location
    pub fn new(config: Config, location: LocationState) -> Result<Self> {
        let coordinator = SearchCoordinator::http(&config)?;
        Ok(Self {
            config,
            coordinator,
            location: RwLock::new(location),
            results: RwLock::new(Vec::new()),
        })
    }

    /// Replace the stored results wholesale
    pub async fn store_results(&self, sites: Vec<RawSite>) {
        *self.results.write().await = sites;
    }

    /// Stored results annotated against the current active point
    pub async fn annotated_results(&self) -> Vec<SiteResult> {
        let center = self.location.read().await.display_point();
        annotate(&self.results.read().await, center)
    }
}
