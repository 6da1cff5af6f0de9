//! Error types for the Azrion core library.

use thiserror::Error;

/// Top-level error type for core operations that touch the outside world.
///
/// Conversation-level code never surfaces these to the user; they are logged
/// and degraded to defaults or reply strings.
#[derive(Error, Debug)]
pub enum AzrionError {
    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for AzrionError {
    fn from(err: serde_json::Error) -> Self {
        AzrionError::Serialization(err.to_string())
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, AzrionError>;
