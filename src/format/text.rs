//! Human-readable text output formatter

use crate::config::Config;
use crate::constants::search::EXCERPT_CHARS;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::search::SearchReport;

/// Text formatter - outputs a readable result list
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, report: &SearchReport, _config: &Config) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("Search: {:?}\n", report.request.query_text));
        output.push_str(&format!("Center: {}\n", report.center));
        output.push_str(&format!(
            "Radius: {} km, limit {}\n\n",
            report.request.radius_km(),
            report.request.limit
        ));

        if report.results.is_empty() {
            output.push_str("No sites found for your query. Try different search parameters.\n");
            return Ok(output);
        }

        for (rank, site) in report.results.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", rank + 1, site.title));
            output.push_str(&format!("   Distance: {:.2} km\n", site.display_distance_km()));
            output.push_str(&format!("   {}\n", site.excerpt(EXCERPT_CHARS)));
            output.push_str(&format!("   Relevance Score: {:.2}\n", site.relevance_score));
        }

        Ok(output)
    }
}
