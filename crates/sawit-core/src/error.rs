//! Error types for the sawit query gateway.

use std::path::PathBuf;
use thiserror::Error;

/// All errors surfaced by the gateway core.
#[derive(Debug, Error)]
pub enum GatewayError {
    // Request validation errors
    #[error("Unknown organization: {0}")]
    InvalidOrganization(String),

    #[error("Identity '{label}' not found in the {org} wallet")]
    IdentityNotFound { org: String, label: String },

    // Credential store errors
    #[error("Wallet error: {message}")]
    Wallet {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    // Connection profile errors
    #[error("Connection profile error at {path:?}: {message}")]
    Profile { message: String, path: PathBuf },

    // Ledger network errors
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        /// Optional cause description
        cause: Option<String>,
    },

    #[error("Evaluation of '{function}' failed: {message}")]
    Evaluation { function: String, message: String },

    // Response payload errors
    #[error("Malformed response payload: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

// Conversion implementations for common error types

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        GatewayError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Connection {
            message: err.to_string(),
            cause: err.url().map(|u| u.to_string()),
        }
    }
}

impl GatewayError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        GatewayError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create a decode error for a malformed response payload.
    pub fn decode(err: serde_json::Error) -> Self {
        GatewayError::Decode {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Whether the error was caused by the inbound request rather than the
    /// ledger network. Kept for callers that want a 4xx/5xx split; the HTTP
    /// layer currently collapses everything but preprocessing to 500.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GatewayError::InvalidOrganization(_)
                | GatewayError::IdentityNotFound { .. }
                | GatewayError::Json { .. }
        )
    }
}
