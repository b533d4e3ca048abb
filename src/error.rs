//! Error types for site-explorer

use thiserror::Error;

/// Message shown for any failure talking to the search API
const FETCH_FAILED_MESSAGE: &str =
    "Failed to fetch data. Please check if your API server is running.";

/// Message shown for rejected manual coordinates
const INVALID_COORDINATES_MESSAGE: &str =
    "Please enter valid coordinates (latitude: -90 to 90, longitude: -180 to 180)";

/// Main error type for site-explorer operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Search query is empty")]
    EmptyQuery,

    #[error("Invalid coordinate format: {0}")]
    InvalidCoordinateFormat(String),

    #[error("Coordinates out of range: {0}")]
    CoordinateOutOfRange(String),

    #[error("Search location has not been resolved yet")]
    LocationUnresolved,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Geo error: {0}")]
    Geo(String),
}

impl Error {
    /// Advisory string suitable for showing to the end user
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyQuery => "Please enter a search query".to_string(),
            Self::InvalidCoordinateFormat(_) | Self::CoordinateOutOfRange(_) => {
                INVALID_COORDINATES_MESSAGE.to_string()
            }
            Self::Transport(_) | Self::MalformedResponse(_) => {
                FETCH_FAILED_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }

    /// Stable machine-readable code for the API
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "EMPTY_QUERY",
            Self::InvalidCoordinateFormat(_) => "INVALID_COORDINATE_FORMAT",
            Self::CoordinateOutOfRange(_) => "COORDINATE_OUT_OF_RANGE",
            Self::LocationUnresolved => "LOCATION_UNRESOLVED",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::MalformedResponse(_) => "MALFORMED_RESPONSE",
            Self::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }

    /// True for errors the user can fix by changing their input
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Self::EmptyQuery | Self::InvalidCoordinateFormat(_) | Self::CoordinateOutOfRange(_)
        )
    }
}

/// Result type alias for site-explorer operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(Error::EmptyQuery.user_message(), "Please enter a search query");
        assert_eq!(
            Error::CoordinateOutOfRange("lat 95".into()).user_message(),
            INVALID_COORDINATES_MESSAGE
        );
        assert_eq!(
            Error::MalformedResponse("missing field".into()).user_message(),
            Error::Transport("connection refused".into()).user_message()
        );
    }

    #[test]
    fn test_codes() {
        assert_eq!(Error::EmptyQuery.code(), "EMPTY_QUERY");
        assert_eq!(Error::Transport(String::new()).code(), "TRANSPORT_ERROR");
        assert_eq!(Error::Geo(String::new()).code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_user_correctable() {
        assert!(Error::EmptyQuery.is_user_correctable());
        assert!(Error::InvalidCoordinateFormat("abc".into()).is_user_correctable());
        assert!(!Error::Transport("timeout".into()).is_user_correctable());
    }
}
