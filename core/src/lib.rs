//! # PhoneVerify Core
//!
//! Core business logic for proving that a user controls a phone number.
//! This crate contains the domain entities, the error taxonomy, the
//! collaborator contracts (verification provider, profile store, identity
//! provider) and the services that drive a verification from phone entry to a
//! persisted "verified" fact.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    AuthenticatedUser, Channel, PhoneNumber, Profile, ProfileVerificationRecord,
    VerificationAttempt, VerificationStatus,
};
pub use errors::{
    DomainError, DomainResult, ProviderError, ProviderErrorKind, SyncError, ValidationError,
};
pub use repositories::{IdentityProvider, MockIdentityProvider, MockProfileStore, ProfileStore};
pub use services::{
    Admission, CheckOutcome, ClientFlowState, Clock, Countdown, FlowConfig, FlowDependencies,
    FlowEvent, FlowMessage, ManualClock, MockVerificationGateway, PhoneFormatter, Prerequisite,
    ProfileSync, ResendThrottle, SessionGuard, StartOutcome, SyncState, SystemClock,
    VerificationFlow, VerificationGateway,
};
