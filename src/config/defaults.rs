//! Default configuration values
//!
//! Named constants for all tunable parameters. The API values double as
//! the fallback used when the config file cannot be loaded.

/// Search API base URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Search API query endpoint path
pub const DEFAULT_QUERY_ENDPOINT: &str = "/api/query";

/// Search API request timeout in seconds
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Default theme mode handed to the front-end
pub const DEFAULT_THEME_MODE: &str = "light";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Default directory for front-end static files
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Default map URL provider
pub const DEFAULT_URL_PROVIDER: &str = "openstreetmap";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "site-explorer";
