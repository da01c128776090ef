//! Verification rules configuration

use serde::{Deserialize, Serialize};

use super::{env_lookup, parse_or, value_or, Lookup};
use crate::errors::{ConfigError, ConfigResult};

/// Phone format, code format, cooldown and client timeouts
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Country code prefixed to local numbers, including the `+`
    pub country_code: String,
    /// Exact number of local digits accepted
    pub local_digits: usize,
    /// Exact number of digits in a one-time code
    pub code_length: usize,
    /// Minimum seconds between two code sends for one phone
    pub resend_cooldown_secs: u64,
    /// Maximum phones tracked by the resend throttle
    pub throttle_capacity: usize,
    /// Upper bound on any single network call made by the client flow
    pub request_timeout_secs: u64,
    /// Base URL of the verification API used by the client flow
    pub api_base_url: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            country_code: String::from("+91"),
            local_digits: 10,
            code_length: 6,
            resend_cooldown_secs: 60,
            throttle_capacity: 10_000,
            request_timeout_secs: 15,
            api_base_url: String::from("http://127.0.0.1:8080"),
        }
    }
}

impl VerificationConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> ConfigResult<Self> {
        let defaults = Self::default();
        let country_code = value_or(lookup, "VERIFICATION_COUNTRY_CODE", &defaults.country_code);
        let valid_code = country_code.len() >= 2
            && country_code.len() <= 4
            && country_code.starts_with('+')
            && country_code[1..].chars().all(|c| c.is_ascii_digit())
            && !country_code[1..].starts_with('0');
        if !valid_code {
            return Err(ConfigError::Invalid {
                key: "VERIFICATION_COUNTRY_CODE".to_string(),
                value: country_code,
            });
        }

        Ok(Self {
            country_code,
            local_digits: parse_or(lookup, "VERIFICATION_LOCAL_DIGITS", defaults.local_digits)?,
            code_length: parse_or(lookup, "VERIFICATION_CODE_LENGTH", defaults.code_length)?,
            resend_cooldown_secs: parse_or(
                lookup,
                "RESEND_COOLDOWN_SECS",
                defaults.resend_cooldown_secs,
            )?,
            throttle_capacity: parse_or(lookup, "THROTTLE_CAPACITY", defaults.throttle_capacity)?,
            request_timeout_secs: parse_or(
                lookup,
                "VERIFICATION_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            api_base_url: value_or(lookup, "VERIFICATION_API_URL", &defaults.api_base_url)
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_country_code_without_plus() {
        let lookup = |key: &str| (key == "VERIFICATION_COUNTRY_CODE").then(|| "91".to_string());
        assert!(VerificationConfig::from_lookup(&lookup).is_err());
    }

    #[test]
    fn test_overrides() {
        let lookup = |key: &str| match key {
            "RESEND_COOLDOWN_SECS" => Some("30".to_string()),
            "VERIFICATION_API_URL" => Some("https://verify.example.com/".to_string()),
            _ => None,
        };
        let config = VerificationConfig::from_lookup(&lookup).unwrap();
        assert_eq!(config.resend_cooldown_secs, 30);
        assert_eq!(config.api_base_url, "https://verify.example.com");
        assert_eq!(config.local_digits, 10);
    }
}
