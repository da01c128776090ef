//! Shared error types

use thiserror::Error;

/// Errors raised while loading configuration from the environment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
}

/// Result alias for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;
