//! Metadata client error types.

use thiserror::Error;

/// Result type for metadata client operations.
pub type TmdbResult<T> = Result<T, TmdbError>;

/// Errors that can occur talking to the metadata service.
#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("Failed to configure metadata client: {0}")]
    ConfigError(String),

    #[error("Metadata service returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl TmdbError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }
}
