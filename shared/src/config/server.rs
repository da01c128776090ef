//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{env_lookup, parse_or, value_or, Lookup};
use crate::errors::ConfigResult;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
            workers: 0,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Load from `SERVER_HOST`, `SERVER_PORT` and `SERVER_WORKERS`
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> ConfigResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            host: value_or(lookup, "SERVER_HOST", &defaults.host),
            port: parse_or(lookup, "SERVER_PORT", defaults.port)?,
            workers: parse_or(lookup, "SERVER_WORKERS", defaults.workers)?,
        })
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
