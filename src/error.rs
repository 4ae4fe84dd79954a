//! Error types for thumbnail-dl
//!
//! A single [`Error`] enum covers the whole library. Components that are
//! expected to keep going on failure (feed fetching, per-file downloads) catch
//! these at their origin and log them; only setup errors escape to callers.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for thumbnail-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for thumbnail-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "selection.width")
        key: Option<String>,
    },

    /// Configuration file could not be parsed
    #[error("failed to parse configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Transport failure or timeout
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// Numeric HTTP status code
        status: u16,
        /// The requested URL
        url: String,
    },

    /// Feed body was not valid JSON (or did not have the expected shape)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Download limit was neither a positive number nor "all"
    #[error("Limit must be a positive number or 'all' (got '{0}')")]
    InvalidLimit(String),

    /// No usable file name could be derived from a URL
    #[error("cannot derive a file name from URL '{url}'")]
    InvalidFilename {
        /// The URL whose last path segment was unusable
        url: String,
    },

    /// Target file exists and the collision policy refused to write it
    #[error("file collision at {path}: {reason}")]
    FileCollision {
        /// The path that collided
        path: PathBuf,
        /// Why the write was refused
        reason: String,
    },
}

impl Error {
    /// Shorthand for a [`Error::Config`] tied to a specific key
    pub(crate) fn config(message: impl Into<String>, key: &str) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}
