//! Profile store and identity endpoint configuration

use serde::{Deserialize, Serialize};

use super::{env_lookup, parse_or, required, Lookup};
use crate::errors::ConfigResult;

/// Settings for the managed backend holding user profiles and sessions
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileStoreConfig {
    /// Backend project URL, e.g. `https://project.supabase.co`
    pub url: String,
    /// Public API key sent with every request
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Table holding profile records
    pub table: String,
    /// Timeout for each store request in seconds
    pub timeout_secs: u64,
}

impl ProfileStoreConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> ConfigResult<Self> {
        Ok(Self {
            url: required(lookup, "PROFILE_STORE_URL")?
                .trim_end_matches('/')
                .to_string(),
            api_key: required(lookup, "PROFILE_STORE_API_KEY")?,
            table: lookup("PROFILE_STORE_TABLE")
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "profiles".to_string()),
            timeout_secs: parse_or(lookup, "PROFILE_STORE_TIMEOUT_SECS", 10)?,
        })
    }
}
