//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Token is not one of the known card identity types
    #[error("Invalid card identity: {0}")]
    InvalidCardIdentity(String),

    /// Storage path is empty or escapes its directory
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Stored file does not exist on disk
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Filename encryption or decryption failed
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Asset URL could not be built
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create an invalid path error with message
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Create a file not found error with message
    pub fn file_not_found(msg: impl Into<String>) -> Self {
        Self::FileNotFound(msg.into())
    }

    /// Create an encryption error with message
    pub fn encryption(msg: impl Into<String>) -> Self {
        Self::Encryption(msg.into())
    }
}
