//! GPX output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::search::SearchReport;

/// GPX formatter - outputs the search point and sites as waypoints
pub struct GpxFormatter;

/// Escape text for XML element content
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, report: &SearchReport, _config: &Config) -> Result<String> {
        let mut gpx = String::new();

        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="site-explorer">"#);
        gpx.push('\n');

        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!(
            "    <name>site-explorer search: {}</name>\n",
            escape_xml(&report.request.query_text)
        ));
        gpx.push_str(&format!("    <time>{}</time>\n", report.searched_at.to_rfc3339()));
        gpx.push_str("  </metadata>\n");

        gpx.push_str(&format!(
            r#"  <wpt lat="{}" lon="{}">"#,
            report.center.lat, report.center.lon
        ));
        gpx.push('\n');
        gpx.push_str("    <name>Search Location</name>\n");
        gpx.push_str(&format!(
            "    <desc>Search radius: {} km</desc>\n",
            report.request.radius_km()
        ));
        gpx.push_str("  </wpt>\n");

        for site in &report.results {
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                site.location.lat, site.location.lon
            ));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(&site.title)));
            gpx.push_str(&format!(
                "    <desc>{:.2} km away, relevance {:.2}</desc>\n",
                site.display_distance_km(),
                site.relevance_score
            ));
            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");

        Ok(gpx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::test_support::sample_report;

    #[test]
    fn test_gpx_format() {
        let output = GpxFormatter
            .format(&sample_report(), &Config::default())
            .unwrap();

        assert!(output.starts_with("<?xml"));
        assert!(output.contains(r#"<gpx version="1.1""#));
        assert!(output.contains("<name>Search Location</name>"));
        assert!(output.contains("<name>Red Fort</name>"));
        assert!(output.contains(r#"<wpt lat="28.6562" lon="77.241">"#));
        assert_eq!(output.matches("<wpt").count(), 3);
        assert!(output.trim_end().ends_with("</gpx>"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Fort & <City>"), "Fort &amp; &lt;City&gt;");
    }
}
