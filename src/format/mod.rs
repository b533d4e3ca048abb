//! Output formatters
//!
//! Provides trait-based output formatting for search reports.

pub mod gpx;
pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::error::Result;
use crate::search::SearchReport;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a search report
    ///
    /// # Arguments
    /// * `report` - The annotated search report
    /// * `config` - Application config (for map url providers)
    fn format(&self, report: &SearchReport, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    let formatters: [Box<dyn OutputFormatter>; 4] = [
        Box::new(text::TextFormatter),
        Box::new(json::JsonFormatter),
        Box::new(gpx::GpxFormatter),
        Box::new(url::UrlFormatter),
    ];

    formatters
        .iter()
        .map(|f| FormatInfo {
            name: f.name().to_string(),
            description: f.description().to_string(),
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::coord::Coordinates;
    use crate::search::{parse_sites, SearchReport, SearchRequest};
    use serde_json::json;

    /// A two-site report centered on Delhi
    pub fn sample_report() -> SearchReport {
        let center = Coordinates::new(28.7041, 77.1025);
        let request = SearchRequest::build(Some(center), "fort", "5", "10").unwrap();
        let sites = parse_sites(json!([
            {
                "id": 1,
                "score": 0.873,
                "payload": {
                    "article_title": "Red Fort",
                    "text": "The Red Fort is a historic fort in Old Delhi that served as the main residence of the Mughal emperors for nearly 200 years.",
                    "location": { "lat": 28.6562, "lon": 77.2410 }
                }
            },
            {
                "id": "tughlaqabad",
                "score": 0.611,
                "payload": {
                    "article_title": "Tughlaqabad Fort",
                    "text": "A ruined fort & city.",
                    "location": { "lat": 28.5134, "lon": 77.2636 }
                }
            }
        ]))
        .unwrap();
        SearchReport::new(request, center, &sites)
    }

    /// A report with no results
    pub fn empty_report() -> SearchReport {
        let center = Coordinates::new(28.7041, 77.1025);
        let request = SearchRequest::build(Some(center), "pyramid", "5", "10").unwrap();
        SearchReport::new(request, center, &[])
    }
}
