//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborator contracts defined in
//! `pv_core`:
//! - **Verify**: Twilio Verify gateway, an HTTP gateway that talks to this
//!   workspace's own API, and a console gateway for local development
//! - **Profile**: REST (PostgREST-style) profile store and identity provider

// Re-export core types for convenience
pub use pv_core::errors::{DomainError, ProviderError, ProviderErrorKind};

/// Verification provider gateways
pub mod verify;

/// Profile store and identity clients
pub mod profile;

pub use profile::{RestIdentityProvider, RestProfileStore};
pub use verify::{
    create_verification_gateway, ConsoleVerificationGateway, HttpVerificationGateway,
    TwilioVerifyGateway,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unexpected response from an external service
    #[error("Unexpected response from {service}: HTTP {status}")]
    UnexpectedStatus { service: &'static str, status: u16 },

    /// Response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::internal(error.to_string())
    }
}

/// Build the shared HTTP client used by every gateway and store
pub(crate) fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, InfrastructureError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(InfrastructureError::from)
}

/// Classify a transport-level failure
pub(crate) fn transport_error(error: &reqwest::Error, timeout_secs: u64) -> ProviderError {
    if error.is_timeout() {
        ProviderError::timeout(timeout_secs)
    } else {
        ProviderError::unavailable(format!("Verification service unreachable: {}", error))
    }
}
