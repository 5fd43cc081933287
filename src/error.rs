//! Unified error types for the API service.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the API service.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings resolution errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The environment file exists but could not be read or parsed.
    #[error("failed to read environment file {path}: {source}")]
    EnvFile {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying parse or IO failure.
        #[source]
        source: dotenvy::Error,
    },

    /// Resolved key/value pairs could not be deserialized into settings.
    #[error("invalid settings: {0}")]
    Env(#[from] envy::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ApiError>;
