//! URL output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::search::SearchReport;

/// URL formatter - outputs one map link per site
///
/// Links use the configured default provider (`url.default`).
pub struct UrlFormatter;

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map link for each site"
    }

    fn format(&self, report: &SearchReport, config: &Config) -> Result<String> {
        let mut output = String::new();
        for site in &report.results {
            let url = config.format_url(None, site.location)?;
            output.push_str(&format!("{}\t{}\n", site.title, url));
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::test_support::{empty_report, sample_report};

    #[test]
    fn test_url_format_default_provider() {
        let output = UrlFormatter
            .format(&sample_report(), &Config::default())
            .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Red Fort\thttps://www.openstreetmap.org/#map=18/28.6562/77.241"
        );
    }

    #[test]
    fn test_url_format_follows_default_provider() {
        let mut config = Config::default();
        config.url.default = "google".to_string();

        let output = UrlFormatter.format(&sample_report(), &config).unwrap();
        assert!(output.contains("google.com/maps"));
    }

    #[test]
    fn test_url_format_unknown_provider() {
        let mut config = Config::default();
        config.url.default = "nope".to_string();

        assert!(UrlFormatter.format(&sample_report(), &config).is_err());
    }

    #[test]
    fn test_url_format_empty() {
        let output = UrlFormatter
            .format(&empty_report(), &Config::default())
            .unwrap();
        assert!(output.is_empty());
    }
}
