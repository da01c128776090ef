//! Client-side phone verification
//!
//! This module provides the verification journey from phone entry to a
//! persisted verified phone:
//! - Phone input normalization and code format checks
//! - The provider contract and a scripted mock of it
//! - Per-phone resend cooldown shared across flows
//! - The flow state machine and its resend countdown

mod config;
mod countdown;
mod flow;
mod formatter;
pub mod mock;
mod throttle;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::{FlowConfig, DEFAULT_REQUEST_TIMEOUT_SECONDS};
pub use countdown::Countdown;
pub use flow::{BusyIndicator, FlowDependencies, VerificationFlow};
pub use formatter::{validate_code, PhoneFormatter};
pub use mock::MockVerificationGateway;
pub use throttle::{ResendThrottle, DEFAULT_THROTTLE_CAPACITY};
pub use traits::{CheckOutcome, StartOutcome, VerificationGateway};
pub use types::{ClientFlowState, FlowEvent, FlowMessage, SyncState};
