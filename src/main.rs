//! site-explorer CLI entry point
//!
//! Location-aware site search - CLI + web app

use site_explorer::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }
}
