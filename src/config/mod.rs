//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/site-explorer/config.toml
//!
//! Configuration is resolved once at startup and then passed by value to
//! whatever needs it.

pub mod defaults;

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Search API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Theme settings handed to the front-end
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Location settings
    #[serde(default)]
    pub location: LocationConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Map link settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Search API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the search API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Endpoint paths by name
    #[serde(default = "default_endpoints")]
    pub endpoints: HashMap<String, String>,
}

/// Theme settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// "light" or "dark"
    #[serde(default = "default_theme_mode")]
    pub default_mode: String,
}

/// Location settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Try IP geolocation for the device location at startup
    #[serde(default = "default_true")]
    pub use_device_location: bool,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory of front-end static files
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Map link settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_API_TIMEOUT_SECS
}
fn default_endpoints() -> HashMap<String, String> {
    let mut endpoints = HashMap::new();
    endpoints.insert("query".to_string(), DEFAULT_QUERY_ENDPOINT.to_string());
    endpoints
}
fn default_theme_mode() -> String {
    DEFAULT_THEME_MODE.to_string()
}
fn default_true() -> bool {
    true
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_static_dir() -> String {
    DEFAULT_STATIC_DIR.to_string()
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lon},15z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map=18/{lat}/{lon}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lon}".to_string(),
    );
    providers
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            endpoints: default_endpoints(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_mode: default_theme_mode(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            use_device_location: true,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Resolve the startup configuration
    ///
    /// Never fails: a config that cannot be loaded is logged and replaced by
    /// the built-in defaults so startup is not blocked.
    pub fn resolve(path: Option<&Path>) -> Self {
        let loaded = match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        };

        match loaded {
            Ok(mut config) => {
                config.restore_query_endpoint();
                config
            }
            Err(e) => {
                warn!("Failed to load configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Put the built-in query endpoint back if the file's endpoint table lacks it
    fn restore_query_endpoint(&mut self) {
        if !self.api.endpoints.contains_key("query") {
            warn!(
                "No query endpoint configured, using {}",
                DEFAULT_QUERY_ENDPOINT
            );
            self.api
                .endpoints
                .insert("query".to_string(), DEFAULT_QUERY_ENDPOINT.to_string());
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Full URL of a named API endpoint
    pub fn api_url(&self, endpoint: &str) -> Result<String> {
        let path = self.api.endpoints.get(endpoint).ok_or_else(|| {
            Error::Config(format!("Unknown API endpoint: {}", endpoint))
        })?;

        Ok(format!("{}{}", self.api.base_url.trim_end_matches('/'), path))
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => Some(self.api.base_url.clone()),
            ["api", "timeout_secs"] => Some(self.api.timeout_secs.to_string()),
            ["api", "endpoints", name] => self.api.endpoints.get(*name).cloned(),

            ["theme", "default_mode"] => Some(self.theme.default_mode.clone()),

            ["location", "use_device_location"] => {
                Some(self.location.use_device_location.to_string())
            }

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),
            ["server", "static_dir"] => Some(self.server.static_dir.clone()),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => {
                self.api.base_url = value.to_string();
            }
            ["api", "timeout_secs"] => {
                self.api.timeout_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
            }
            ["api", "endpoints", name] => {
                if !value.starts_with('/') {
                    return Err(Error::Config(format!(
                        "Endpoint path must start with '/': {}",
                        value
                    )));
                }
                self.api.endpoints.insert(name.to_string(), value.to_string());
            }

            ["theme", "default_mode"] => match value {
                "light" | "dark" => self.theme.default_mode = value.to_string(),
                _ => {
                    return Err(Error::Config(format!("Invalid theme mode: {}", value)));
                }
            },

            ["location", "use_device_location"] => {
                self.location.use_device_location = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid boolean value: {}", value))
                })?;
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }
            ["server", "static_dir"] => {
                self.server.static_dir = value.to_string();
            }

            ["url", "default"] => {
                self.url.default = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "api.base_url",
            "api.timeout_secs",
            "api.endpoints.query",
            "theme.default_mode",
            "location.use_device_location",
            "server.host",
            "server.port",
            "server.static_dir",
            "url.default",
        ]
    }

    /// Format a map URL for a coordinate using the specified provider
    ///
    /// Replaces {lat} and {lon} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, coords: Coordinates) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self.url.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{lat}", &coords.lat.to_string())
            .replace("{lon}", &coords.lon.to_string()))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
