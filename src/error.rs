use thiserror::Error;

use crate::config::ConfigError;

/// Fatal errors that stop the adapter from starting or serving.
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Backend is not available after {attempts} health check attempt(s): {source}")]
    BackendUnavailable {
        attempts: u32,
        #[source]
        source: BackendError,
    },

    #[error("Backend client could not be created: {0}")]
    Client(#[source] BackendError),

    #[error("Startup interrupted by shutdown signal")]
    Interrupted,

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Errors raised while talking to the log backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("invalid backend base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("backend reported unhealthy status {0:?}")]
    Unhealthy(String),

    #[error("alert {0:?} not found")]
    AlertNotFound(String),
}

impl BackendError {
    /// True when name resolution found no alert with the requested name.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AlertNotFound(_))
    }
}
