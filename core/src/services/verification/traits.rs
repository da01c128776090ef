//! Contract for the external verification provider

use async_trait::async_trait;

use crate::domain::entities::{Channel, PhoneNumber, VerificationStatus};
use crate::errors::ProviderError;

/// Result of asking the provider to send a code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOutcome {
    /// Always [`VerificationStatus::Pending`] on success
    pub status: VerificationStatus,
    /// Provider-side identifier of the verification, when one is returned
    pub sid: Option<String>,
}

impl StartOutcome {
    pub fn pending(sid: Option<String>) -> Self {
        Self {
            status: VerificationStatus::Pending,
            sid,
        }
    }
}

/// Authoritative decision on a submitted code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Approved,
    /// Wrong or expired code; a business outcome, not a failure
    Denied,
}

impl From<CheckOutcome> for VerificationStatus {
    fn from(outcome: CheckOutcome) -> Self {
        match outcome {
            CheckOutcome::Approved => VerificationStatus::Approved,
            CheckOutcome::Denied => VerificationStatus::Denied,
        }
    }
}

/// Trait for the external system that generates, delivers and validates codes.
///
/// Calling `start_verification` again for the same phone issues a new code;
/// callers must not assume an earlier code stays valid.
#[async_trait]
pub trait VerificationGateway: Send + Sync {
    /// Ask the provider to deliver a fresh code to `phone` over `channel`
    async fn start_verification(
        &self,
        phone: &PhoneNumber,
        channel: Channel,
    ) -> Result<StartOutcome, ProviderError>;

    /// Ask the provider whether `code` is the current code for `phone`
    async fn check_verification(
        &self,
        phone: &PhoneNumber,
        code: &str,
    ) -> Result<CheckOutcome, ProviderError>;
}
