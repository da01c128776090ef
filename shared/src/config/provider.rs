//! Verification provider configuration

use serde::{Deserialize, Serialize};

use super::{env_lookup, parse_or, required, value_or, Lookup};
use crate::errors::{ConfigError, ConfigResult};

/// Default base URL of the Twilio Verify v2 API
pub const DEFAULT_TWILIO_VERIFY_URL: &str = "https://verify.twilio.com";

/// Code accepted by the mock provider in development
pub const DEFAULT_MOCK_CODE: &str = "123456";

/// Which provider backs the verification endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Twilio Verify
    Twilio,
    /// In-process provider that logs codes instead of sending them
    Mock,
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "twilio" => Ok(ProviderKind::Twilio),
            "mock" => Ok(ProviderKind::Mock),
            _ => Err(format!("Unknown verification provider: {}", s)),
        }
    }
}

/// Credentials and transport settings for the verification provider
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    #[serde(skip_serializing)]
    pub auth_token: String,
    /// Verify service SID
    pub service_sid: String,
    /// API base URL, overridable for testing against a stub
    pub base_url: String,
    /// Timeout for each provider request in seconds
    pub timeout_secs: u64,
    /// Code the mock provider approves
    pub mock_code: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Mock,
            account_sid: String::new(),
            auth_token: String::new(),
            service_sid: String::new(),
            base_url: DEFAULT_TWILIO_VERIFY_URL.to_string(),
            timeout_secs: 10,
            mock_code: DEFAULT_MOCK_CODE.to_string(),
        }
    }
}

impl ProviderConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(&env_lookup)
    }

    /// Twilio credentials are only required when the Twilio provider is selected.
    pub fn from_lookup(lookup: Lookup<'_>) -> ConfigResult<Self> {
        let defaults = Self::default();
        let kind_raw = value_or(lookup, "VERIFY_PROVIDER", "twilio");
        let kind = kind_raw
            .parse::<ProviderKind>()
            .map_err(|_| ConfigError::Invalid {
                key: "VERIFY_PROVIDER".to_string(),
                value: kind_raw.clone(),
            })?;

        let (account_sid, auth_token, service_sid) = match kind {
            ProviderKind::Twilio => (
                required(lookup, "TWILIO_ACCOUNT_SID")?,
                required(lookup, "TWILIO_AUTH_TOKEN")?,
                required(lookup, "VERIFY_SERVICE_SID")?,
            ),
            ProviderKind::Mock => (String::new(), String::new(), String::new()),
        };

        let base_url = value_or(lookup, "TWILIO_VERIFY_BASE_URL", &defaults.base_url);

        Ok(Self {
            kind,
            account_sid,
            auth_token,
            service_sid,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs: parse_or(lookup, "PROVIDER_TIMEOUT_SECS", defaults.timeout_secs)?,
            mock_code: value_or(lookup, "MOCK_VERIFY_CODE", &defaults.mock_code),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twilio_requires_credentials() {
        let lookup = |key: &str| match key {
            "TWILIO_ACCOUNT_SID" => Some("AC123".to_string()),
            _ => None,
        };
        let err = ProviderConfig::from_lookup(&lookup).unwrap_err();
        assert_eq!(err, ConfigError::Missing("TWILIO_AUTH_TOKEN".to_string()));
    }

    #[test]
    fn test_twilio_full_configuration() {
        let lookup = |key: &str| match key {
            "TWILIO_ACCOUNT_SID" => Some("AC123".to_string()),
            "TWILIO_AUTH_TOKEN" => Some("secret".to_string()),
            "VERIFY_SERVICE_SID" => Some("VA456".to_string()),
            "TWILIO_VERIFY_BASE_URL" => Some("http://localhost:9000/".to_string()),
            _ => None,
        };
        let config = ProviderConfig::from_lookup(&lookup).unwrap();
        assert_eq!(config.kind, ProviderKind::Twilio);
        assert_eq!(config.service_sid, "VA456");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let lookup = |key: &str| (key == "VERIFY_PROVIDER").then(|| "carrier-pigeon".to_string());
        assert!(matches!(
            ProviderConfig::from_lookup(&lookup),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
