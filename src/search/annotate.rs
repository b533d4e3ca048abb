//! Distance annotation
//!
//! Attaches the great-circle distance from the active search point to each
//! site. Order is preserved: ranking is the server's job.

use crate::coord::distance::{distance_km, round_km};
use crate::coord::Coordinates;
use crate::search::response::{RawSite, SiteId};
use serde::{Deserialize, Serialize};

/// A site with its distance from the search point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteResult {
    pub id: SiteId,
    pub title: String,
    pub body_text: String,
    pub location: Coordinates,
    pub relevance_score: f64,
    /// Full-precision distance in kilometers
    pub distance_km: f64,
}

impl SiteResult {
    /// Distance rounded to 2 decimal places
    pub fn display_distance_km(&self) -> f64 {
        round_km(self.distance_km)
    }

    /// First `max_chars` characters of the body text, with "..." if cut
    pub fn excerpt(&self, max_chars: usize) -> String {
        let mut chars = self.body_text.chars();
        let excerpt: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}...", excerpt)
        } else {
            excerpt
        }
    }
}

/// Annotate sites with their distance from `center`
pub fn annotate(sites: &[RawSite], center: Coordinates) -> Vec<SiteResult> {
    sites
        .iter()
        .map(|site| SiteResult {
            id: site.id.clone(),
            title: site.title.clone(),
            body_text: site.text.clone(),
            location: site.location,
            relevance_score: site.score,
            distance_km: distance_km(center, site.location),
        })
        .collect()
}

/// Order results nearest first using full-precision distances
///
/// Stable, so equally distant sites keep their relevance order.
pub fn sort_by_distance(results: &mut [SiteResult]) {
    results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
}
