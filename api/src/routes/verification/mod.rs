//! Verification endpoints
//!
//! - `POST /api/start-verification`: ask the provider to send a code
//! - `POST /api/check-verification`: ask the provider to judge a code

use std::sync::Arc;

use pv_core::services::VerificationGateway;

pub mod check;
pub mod start;

pub use check::check_verification;
pub use start::start_verification;

/// Application state shared by every worker
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn VerificationGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn VerificationGateway>) -> Self {
        Self { gateway }
    }
}
