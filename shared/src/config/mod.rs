//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and logging configuration
//! - `provider` - External verification provider credentials
//! - `server` - HTTP server binding
//! - `store` - Profile store and identity endpoints
//! - `verification` - Phone format, code length, cooldown and timeouts
//!
//! Every section can be loaded from the process environment (`from_env`) or
//! from an arbitrary key lookup (`from_lookup`), which keeps tests free of
//! global environment mutation.

pub mod environment;
pub mod provider;
pub mod server;
pub mod store;
pub mod verification;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{ConfigError, ConfigResult};

// Re-export commonly used types
pub use environment::{Environment, LoggingConfig};
pub use provider::{ProviderConfig, ProviderKind};
pub use server::ServerConfig;
pub use store::ProfileStoreConfig;
pub use verification::VerificationConfig;

/// Key lookup used by the `from_lookup` constructors
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Lookup backed by the process environment
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

pub(crate) fn value_or(lookup: Lookup<'_>, key: &str, default: &str) -> String {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub(crate) fn parse_or<T: FromStr>(lookup: Lookup<'_>, key: &str, default: T) -> ConfigResult<T> {
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

pub(crate) fn required(lookup: Lookup<'_>, key: &str) -> ConfigResult<String> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::Missing(key.to_string()))
}

/// Complete server configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Verification provider configuration
    pub provider: ProviderConfig,

    /// Verification rules
    #[serde(default)]
    pub verification: VerificationConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(&env_lookup)
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: Lookup<'_>) -> ConfigResult<Self> {
        let environment = lookup("ENVIRONMENT")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let mut logging = LoggingConfig::for_environment(environment);
        if let Some(level) = lookup("LOG_LEVEL").filter(|v| !v.trim().is_empty()) {
            logging.level = level;
        }

        Ok(Self {
            environment,
            server: ServerConfig::from_lookup(lookup)?,
            logging,
            provider: ProviderConfig::from_lookup(lookup)?,
            verification: VerificationConfig::from_lookup(lookup)?,
        })
    }
}
