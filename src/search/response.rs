//! Search API response parsing
//!
//! The API answers with a JSON array of scored records:
//!
//! ```json
//! [{ "id": 17, "score": 0.82,
//!    "payload": { "article_title": "...", "text": "...",
//!                 "location": { "lat": 28.6, "lon": 77.2 } } }]
//! ```
//!
//! Any record that deviates from this shape fails the whole response.

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Site identifier; the API may use numbers or strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SiteId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A site as returned by the search API, before distance annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSite {
    pub id: SiteId,
    pub title: String,
    pub text: String,
    pub location: Coordinates,
    pub score: f64,
}

#[derive(Debug, Deserialize)]
struct WireSite {
    id: SiteId,
    score: f64,
    payload: WirePayload,
}

#[derive(Debug, Deserialize)]
struct WirePayload {
    article_title: String,
    text: String,
    location: Coordinates,
}

impl From<WireSite> for RawSite {
    fn from(site: WireSite) -> Self {
        Self {
            id: site.id,
            title: site.payload.article_title,
            text: site.payload.text,
            location: site.payload.location,
            score: site.score,
        }
    }
}

/// Parse a search API response body into sites, preserving order
pub fn parse_sites(body: serde_json::Value) -> Result<Vec<RawSite>> {
    let sites: Vec<WireSite> = serde_json::from_value(body)
        .map_err(|e| Error::MalformedResponse(format!("Unexpected search response: {}", e)))?;

    Ok(sites.into_iter().map(RawSite::from).collect())
}
