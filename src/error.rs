//! Error types for the movie/TV MCP server.

use serde_json::{json, Map, Value};
use thiserror::Error;

/// Where users obtain a TMDb API key.
pub const SETUP_URL: &str = "https://www.themoviedb.org/settings/api";

/// Published TMDb rate limit, surfaced on 429 responses.
pub const RATE_LIMIT_HINT: &str = "40 requests per 10 seconds";

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-level error type for configuration, startup and protocol I/O.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration file {path}: {source}")]
    ConfigFile {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}

/// Result type alias for calls against the upstream API.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Terminal outcome of a failed upstream call.
///
/// Every variant is reported to the caller exactly once as an error envelope;
/// none of them is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("TMDb API key not configured. Please set TMDB_API_KEY environment variable.")]
    NotConfigured,

    #[error("Invalid TMDb API key. Please check your API key configuration.")]
    InvalidKey,

    #[error("Resource not found. Please check the ID or search parameters.")]
    NotFound,

    #[error("Invalid parameters provided to the API.")]
    InvalidParameters,

    #[error("Rate limit exceeded. Please wait before making more requests.")]
    RateLimited,

    #[error("TMDb server error. Please try again later.")]
    ServerError,

    #[error("HTTP error: {0}")]
    Status(String),

    #[error("Request timeout after {0} seconds. Please try again.")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),

    /// Caller input rejected before any network call.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Map a non-success HTTP status to its error.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            401 => ApiError::InvalidKey,
            404 => ApiError::NotFound,
            422 => ApiError::InvalidParameters,
            429 => ApiError::RateLimited,
            code if code >= 500 => ApiError::ServerError,
            _ => ApiError::Status(status.to_string()),
        }
    }

    /// Render this error as a `success = false` envelope.
    pub fn to_envelope(&self) -> Value {
        let mut envelope = Map::new();
        envelope.insert("success".to_string(), json!(false));
        envelope.insert("error".to_string(), json!(self.to_string()));

        match self {
            ApiError::NotConfigured | ApiError::InvalidKey => {
                envelope.insert("setup_url".to_string(), json!(SETUP_URL));
            }
            ApiError::RateLimited => {
                envelope.insert("rate_limit".to_string(), json!(RATE_LIMIT_HINT));
            }
            _ => {}
        }

        Value::Object(envelope)
    }
}
