//! Serve command handler
//!
//! Starts the HTTP server in foreground mode.

use crate::config::Config;
use crate::error::Result;
use crate::geo::{initialize_location, IpLocator};
use crate::server;
use clap::Args;
use std::path::Path;
use tracing::info;

/// Serve command arguments
#[derive(Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,
}

/// Run the serve command
pub async fn run(args: ServeArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = Config::resolve(config_path);

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    info!(
        "Starting site-explorer server v{} on {}",
        env!("CARGO_PKG_VERSION"),
        config.server_addr()
    );

    let location =
        initialize_location(config.location.use_device_location, &IpLocator::new()).await;

    server::run(config, location).await
}
