//! Error types for the verification subsystem
//!
//! - [`ValidationError`]: local input problems, raised before any network call
//! - [`ProviderError`]: the verification provider was unreachable, rejected
//!   the request, or answered ambiguously
//! - [`SyncError`]: the profile store could not persist an approved verification
//!
//! A rejected code is not an error; it is reported as
//! [`crate::services::verification::CheckOutcome::Denied`].

use thiserror::Error;

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid format for field: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length for field: {field} (expected: {expected}, actual: {actual})")]
    WrongLength {
        field: String,
        expected: usize,
        actual: usize,
    },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            ValidationError::RequiredField { field }
            | ValidationError::InvalidFormat { field }
            | ValidationError::WrongLength { field, .. } => field,
        }
    }
}

/// Category of a provider failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// The provider considers the phone number malformed or unroutable
    InvalidPhone,
    /// The provider refused the request (e.g. too many sends, bad credentials)
    Rejected,
    /// The provider could not be reached or returned a server error
    Unavailable,
    /// No answer within the configured bound
    Timeout,
    /// The provider answered with a status this system does not understand
    Ambiguous,
}

/// Failure reported by the verification provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    /// Machine-readable code from the provider, when one was returned
    pub code: Option<String>,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn invalid_phone(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidPhone, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unavailable, message)
    }

    pub fn timeout(seconds: u64) -> Self {
        Self::new(
            ProviderErrorKind::Timeout,
            format!("Verification service did not respond within {} seconds", seconds),
        )
    }

    /// Malformed-phone errors send the user back to phone entry; everything
    /// else is retried in place.
    pub fn is_malformed_phone(&self) -> bool {
        self.kind == ProviderErrorKind::InvalidPhone
    }
}

/// Failure to persist an approved verification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("Profile store write failed: {message}")]
    Store { message: String },

    #[error("Profile store did not respond within {seconds} seconds")]
    Timeout { seconds: u64 },
}

impl SyncError {
    /// Message shown to the user; distinct from any "try the code again" wording
    pub fn user_message(&self) -> &'static str {
        "Your phone was verified but we could not save it. Please retry saving."
    }
}
