//! State and event types of the client verification flow

use chrono::{DateTime, Utc};
use std::fmt;

use crate::domain::entities::{PhoneNumber, VerificationAttempt};
use crate::errors::{ProviderError, SyncError, ValidationError};

/// Transient message shown next to the current input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowMessage {
    Validation(ValidationError),
    /// The provider rejected the submitted code
    InvalidCode,
    Provider(ProviderError),
    CooldownActive { seconds: u64 },
}

impl fmt::Display for FlowMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowMessage::Validation(ValidationError::RequiredField { field }) if field == "phone" => {
                f.write_str("Phone number required")
            }
            FlowMessage::Validation(ValidationError::WrongLength {
                field, expected, ..
            }) if field == "phone" => write!(f, "Enter a valid {}-digit phone number", expected),
            FlowMessage::Validation(ValidationError::WrongLength {
                field, expected, ..
            }) if field == "code" => write!(f, "Enter the {}-digit code", expected),
            FlowMessage::Validation(ValidationError::RequiredField { field })
            | FlowMessage::Validation(ValidationError::InvalidFormat { field })
                if field == "code" =>
            {
                f.write_str("Enter the code you received")
            }
            FlowMessage::Validation(other) => write!(f, "{}", other),
            FlowMessage::InvalidCode => f.write_str("Invalid code. Please try again."),
            FlowMessage::Provider(error) => f.write_str(&error.message),
            FlowMessage::CooldownActive { seconds } => write!(
                f,
                "Please wait {} seconds before requesting a new code",
                seconds
            ),
        }
    }
}

/// Outcome of persisting the verified phone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    /// Write in progress, or interrupted before it finished
    Saving,
    Saved,
    /// `message` is shown to the user, `reason` is the store error
    Failed { message: String, reason: String },
}

/// Where the user is in the verification journey.
///
/// There is no code-entry state without an attempt; the resend countdown is
/// derived from `attempt.resend_available_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientFlowState {
    CollectingPhone {
        message: Option<FlowMessage>,
    },
    AwaitingCode {
        attempt: VerificationAttempt,
        message: Option<FlowMessage>,
    },
    /// Terminal: no further provider calls are made
    Verified { phone: PhoneNumber, sync: SyncState },
}

impl ClientFlowState {
    pub fn message(&self) -> Option<&FlowMessage> {
        match self {
            ClientFlowState::CollectingPhone { message }
            | ClientFlowState::AwaitingCode { message, .. } => message.as_ref(),
            ClientFlowState::Verified { .. } => None,
        }
    }

    pub fn attempt(&self) -> Option<&VerificationAttempt> {
        match self {
            ClientFlowState::AwaitingCode { attempt, .. } => Some(attempt),
            _ => None,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, ClientFlowState::Verified { .. })
    }
}

/// What a flow action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    /// A code was dispatched; a new one may be requested after the instant given
    CodeSent { resend_available_at: DateTime<Utc> },
    /// The send was refused locally because of the resend cooldown
    CooldownActive { remaining_seconds: u64 },
    /// Input rejected before any network call
    InvalidInput(ValidationError),
    /// The provider denied the code
    InvalidCode,
    ProviderFailed(ProviderError),
    /// Code approved and the verified phone persisted
    Verified,
    /// Code approved but the profile store write failed
    SaveFailed(SyncError),
    /// A retried profile store write succeeded
    Saved,
    /// The flow returned to phone entry at the user's request
    PhoneEntryReopened,
    /// Another action is still in flight
    Busy,
    /// The action does not apply in the current state
    Ignored,
}
