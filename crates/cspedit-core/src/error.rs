//! Core error types for cspedit-core.
//!
//! Malformed user input never shows up here: the editor re-prompts for it.
//! These errors cover the collaborators around the editor (network, terminal,
//! storage, configuration).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cspedit-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Policy retrieval errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to write the final policy
    #[error("Failed to write policy to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Terminal IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors raised while retrieving a policy header.
///
/// The entry point reports these and continues with an empty directive set.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Target could not be parsed as a URL
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Only http and https can carry a response header
    #[error("Unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    /// Connection, DNS, TLS or timeout failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Header present but not representable as text
    #[error("Header '{header}' is not valid text")]
    InvalidHeader { header: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
