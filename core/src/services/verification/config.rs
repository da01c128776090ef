//! Configuration for the client verification flow

use std::time::Duration;

use pv_shared::config::VerificationConfig;

use crate::domain::entities::{CODE_LENGTH, DEFAULT_COUNTRY_CODE, LOCAL_DIGITS, RESEND_COOLDOWN_SECONDS};

use super::throttle::DEFAULT_THROTTLE_CAPACITY;

/// Default upper bound on a single gateway or store call
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 15;

/// Rules applied by the flow and its helpers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowConfig {
    /// Country code prefixed to local digits, including the `+`
    pub country_code: String,
    /// Exact number of local digits accepted
    pub local_digits: usize,
    /// Exact number of digits in a code
    pub code_length: usize,
    /// Minimum seconds between sends for one phone
    pub resend_cooldown_seconds: u64,
    /// Maximum phones tracked by the shared resend throttle
    pub throttle_capacity: usize,
    /// Bound on each network call
    pub request_timeout_seconds: u64,
}

impl FlowConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn resend_cooldown(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.resend_cooldown_seconds as i64)
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            local_digits: LOCAL_DIGITS,
            code_length: CODE_LENGTH,
            resend_cooldown_seconds: RESEND_COOLDOWN_SECONDS,
            throttle_capacity: DEFAULT_THROTTLE_CAPACITY,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
        }
    }
}

impl From<&VerificationConfig> for FlowConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            country_code: config.country_code.clone(),
            local_digits: config.local_digits,
            code_length: config.code_length,
            resend_cooldown_seconds: config.resend_cooldown_secs,
            throttle_capacity: config.throttle_capacity,
            request_timeout_seconds: config.request_timeout_secs,
        }
    }
}
