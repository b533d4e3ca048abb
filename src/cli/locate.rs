//! Locate command handler
//!
//! Shows where searches would be centered.

use crate::config::Config;
use crate::error::Result;
use crate::geo::{initialize_location, IpLocator};
use clap::Args;
use std::path::Path;

/// Locate command arguments
#[derive(Args)]
pub struct LocateArgs {
    /// Use current location (IP geolocation) even if disabled in config
    #[arg(long)]
    pub here: bool,

    /// Print the location snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Ignore the cached IP location
    #[arg(long)]
    pub refresh: bool,
}

/// Run the locate command
pub async fn run(args: LocateArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Config::resolve(config_path);

    let locator = IpLocator::new();
    if args.refresh {
        locator.clear_cache();
    }

    let use_device = args.here || config.location.use_device_location;
    let location = initialize_location(use_device, &locator).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&location.snapshot())?);
        return Ok(());
    }

    match location.device_location() {
        Some(device) => println!("Device location: {}", device),
        None => println!("Device location: unknown"),
    }
    println!("Search point:    {}", location.display_point());
    if let Ok(url) = config.format_url(None, location.display_point()) {
        println!("Map:             {}", url);
    }

    Ok(())
}
