//! Search command handler
//!
//! Runs one search cycle from the command line.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::geo::{initialize_location, IpLocator};
use crate::location::LocationState;
use crate::search::{sort_by_distance, SearchCoordinator, SearchReport, SearchRequest};
use clap::{Args, ValueEnum};
use std::path::Path;

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Server ranking
    Relevance,
    /// Nearest first
    Distance,
}

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Search query
    pub query: Option<String>,

    /// Maximum number of results (1-50)
    #[arg(long, short = 'l', default_value = "5")]
    pub limit: String,

    /// Search radius in kilometers
    #[arg(long, short = 'r', default_value = "10")]
    pub radius: String,

    /// Latitude of the search point
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<String>,

    /// Longitude of the search point
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<String>,

    /// Use current location (IP geolocation)
    #[arg(long)]
    pub here: bool,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// Result ordering
    #[arg(long, value_enum, default_value_t = SortOrder::Relevance)]
    pub sort: SortOrder,

    /// Map link provider for url output (e.g., "google", "apple")
    #[arg(long)]
    pub provider: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the search command
pub async fn run(args: SearchArgs, config_path: Option<&Path>) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let mut config = Config::resolve(config_path);
    if let Some(provider) = &args.provider {
        select_provider(&mut config, provider)?;
    }

    let formatter = get_formatter(&args.format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", args.format)))?;

    let mut location =
        initialize_location(wants_device_lookup(&args, &config), &IpLocator::new()).await;
    apply_manual_location(&mut location, &args)?;

    let query = args.query.as_deref().unwrap_or_default();
    let request =
        SearchRequest::build(location.active_search_point(), query, &args.limit, &args.radius)?;

    let coordinator = SearchCoordinator::http(&config)?;
    let sites = coordinator.send(&request).await?;

    let center = location.display_point();
    let mut report = SearchReport::new(request, center, &sites);
    if args.sort == SortOrder::Distance {
        sort_by_distance(&mut report.results);
    }

    let output = formatter.format(&report, &config)?;

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        print!("{}", output);
    }

    Ok(())
}

/// Explicit `--lat/--lon` replace the device location, so skip the lookup
fn wants_device_lookup(args: &SearchArgs, config: &Config) -> bool {
    let manual = args.lat.is_some() && args.lon.is_some();
    !manual && (args.here || config.location.use_device_location)
}

/// Make `provider` the map link provider for this run
fn select_provider(config: &mut Config, provider: &str) -> Result<()> {
    if !config.url.providers.contains_key(provider) {
        return Err(Error::Config(format!("Unknown URL provider: {}", provider)));
    }
    config.url.default = provider.to_string();
    Ok(())
}

/// Promote `--lat/--lon` through the manual entry path
fn apply_manual_location(location: &mut LocationState, args: &SearchArgs) -> Result<()> {
    if let (Some(lat), Some(lon)) = (&args.lat, &args.lon) {
        location.set_manual_mode(true);
        location.set_draft(lat.as_str(), lon.as_str());
        location.submit_manual_draft()?;
    }
    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;

    fn args(lat: Option<&str>, lon: Option<&str>) -> SearchArgs {
        SearchArgs {
            query: Some("fort".to_string()),
            limit: "5".to_string(),
            radius: "10".to_string(),
            lat: lat.map(String::from),
            lon: lon.map(String::from),
            here: false,
            format: "text".to_string(),
            sort: SortOrder::Relevance,
            provider: None,
            output: None,
            list_formats: false,
        }
    }

    #[test]
    fn test_manual_location_applied() {
        let mut location = LocationState::new();
        location.resolve_device_failed();

        apply_manual_location(&mut location, &args(Some("-33.8688"), Some("151.2093"))).unwrap();
        assert_eq!(
            location.active_search_point(),
            Some(Coordinates::new(-33.8688, 151.2093))
        );
    }

    #[test]
    fn test_manual_location_rejected() {
        let mut location = LocationState::new();
        location.resolve_device_failed();

        let err = apply_manual_location(&mut location, &args(Some("95"), Some("0"))).unwrap_err();
        assert!(matches!(err, Error::CoordinateOutOfRange(_)));
        assert_eq!(location.active_search_point(), Some(Coordinates::fallback()));
    }

    #[test]
    fn test_manual_location_skips_device_lookup() {
        let config = Config::default();
        assert!(config.location.use_device_location);

        assert!(!wants_device_lookup(&args(Some("1"), Some("2")), &config));
        assert!(wants_device_lookup(&args(None, None), &config));

        let here = SearchArgs {
            here: true,
            ..args(Some("1"), Some("2"))
        };
        assert!(!wants_device_lookup(&here, &config));
    }

    #[test]
    fn test_device_lookup_follows_config() {
        let mut config = Config::default();
        config.location.use_device_location = false;

        assert!(!wants_device_lookup(&args(None, None), &config));
        let here = SearchArgs {
            here: true,
            ..args(None, None)
        };
        assert!(wants_device_lookup(&here, &config));
    }

    #[test]
    fn test_select_provider() {
        let mut config = Config::default();
        select_provider(&mut config, "apple").unwrap();
        assert_eq!(config.url.default, "apple");

        let err = select_provider(&mut config, "mapquest").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(config.url.default, "apple");
    }

    #[test]
    fn test_provider_reaches_url_output() {
        use crate::format::test_support::sample_report;

        let mut config = Config::default();
        select_provider(&mut config, "google").unwrap();

        let output = get_formatter("url")
            .unwrap()
            .format(&sample_report(), &config)
            .unwrap();
        assert!(output.contains("https://www.google.com/maps/@28.6562,77.241,15z"));
    }

    #[test]
    fn test_no_manual_location() {
        let mut location = LocationState::new();
        location.resolve_device_failed();

        apply_manual_location(&mut location, &args(None, None)).unwrap();
        assert_eq!(location.active_search_point(), Some(Coordinates::fallback()));
    }
}
