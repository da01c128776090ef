//! API response bodies
//!
//! The verification endpoints use deliberately small bodies: a success flag
//! with the provider status, or an `error` string with an optional
//! machine-readable `code`. Both the server and the HTTP client gateway use
//! these types so the two sides cannot drift apart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message returned when the provider rejects a submitted code
pub const INVALID_OTP_MESSAGE: &str = "Invalid OTP";

/// Body of a successful `POST /api/start-verification`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartVerificationResponse {
    pub success: bool,
    /// Provider status of the new verification, `pending` on success
    pub status: String,
}

impl StartVerificationResponse {
    pub fn pending() -> Self {
        Self {
            success: true,
            status: String::from("pending"),
        }
    }
}

/// Body of a successful `POST /api/check-verification`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckVerificationResponse {
    pub success: bool,
}

impl CheckVerificationResponse {
    pub fn approved() -> Self {
        Self { success: true }
    }
}

/// Error body shared by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable error message
    pub error: String,

    /// Provider or application error code, when one is known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: Option<String>) -> Self {
        self.code = code;
        self
    }

    /// Whether this body is the provider's code rejection
    pub fn is_invalid_otp(&self) -> bool {
        self.error == INVALID_OTP_MESSAGE
    }
}

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,

    /// Service name
    pub service: String,

    /// Server version
    pub version: String,

    /// Server timestamp
    pub timestamp: DateTime<Utc>,
}
