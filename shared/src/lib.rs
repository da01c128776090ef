//! Shared utilities and common types for the phone verification services
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Wire types for the verification endpoints
//! - Utility functions (phone normalization, masking, E.164 checks)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, LoggingConfig, ProfileStoreConfig, ProviderConfig, ServerConfig,
    VerificationConfig,
};
pub use errors::ConfigError;
pub use types::{ApiErrorBody, CheckVerificationResponse, StartVerificationResponse};
pub use utils::phone;
