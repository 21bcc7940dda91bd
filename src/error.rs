//! Error types for the voxbridge relay

use thiserror::Error;

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the relay
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (missing credential, bad bind address)
    #[error("configuration error: {0}")]
    Config(String),

    /// Request validation error (missing/blank field, disallowed upload)
    #[error("{0}")]
    Validation(String),

    /// Generative backend failure (Gemini call failed or returned an
    /// unusable structure)
    #[error("generation error: {0}")]
    Generation(String),

    /// Speech synthesis failure
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// Upstream call exceeded its deadline
    #[error("upstream timeout: {0}")]
    Timeout(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
