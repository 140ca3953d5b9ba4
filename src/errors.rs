//! Shared error types for claimguard.
//!
//! The detection engine itself never fails on malformed claim data: bad
//! dates, amounts and missing fields degrade to documented defaults during
//! normalization. The variants here cover the cases a caller can get wrong
//! outright (input of the wrong shape, settings that are not a table) plus
//! the I/O and parsing failures of the command-line collaborators.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for claimguard operations
#[derive(Debug, Error)]
pub enum Error {
    /// Input handed to the engine is not a sequence of row objects
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Detection settings were supplied in the wrong shape
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Configuration file errors
    #[error("Configuration error in {path}: {message}")]
    Configuration { path: PathBuf, message: String },

    /// Input file has an extension we do not know how to load
    #[error("Unsupported input format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Delimited text errors
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create an invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an invalid-settings error
    pub fn invalid_settings(message: impl Into<String>) -> Self {
        Self::InvalidSettings(message.into())
    }

    /// Create a configuration error tied to a file
    pub fn configuration(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Configuration {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the caller handed the engine something it must reject.
    pub fn is_invocation_failure(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::InvalidSettings(_))
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
