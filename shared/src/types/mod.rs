//! Type definitions shared by the API server and its HTTP clients
//!
//! - `response` - response bodies of the verification endpoints and health checks

pub mod response;

// Re-export commonly used types at module level
pub use response::{
    ApiErrorBody, CheckVerificationResponse, HealthResponse, HealthStatus,
    StartVerificationResponse, INVALID_OTP_MESSAGE,
};
