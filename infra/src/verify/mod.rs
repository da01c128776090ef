//! Verification gateways
//!
//! - [`TwilioVerifyGateway`]: Twilio Verify v2, used by the API server
//! - [`HttpVerificationGateway`]: the API server's own endpoints, used by
//!   client flows
//! - [`ConsoleVerificationGateway`]: logs codes instead of sending them

use std::sync::Arc;

use pv_core::services::VerificationGateway;
use pv_shared::config::{ProviderConfig, ProviderKind};

use crate::InfrastructureError;

pub mod console;
pub mod http_gateway;
pub mod twilio;

pub use console::ConsoleVerificationGateway;
pub use http_gateway::HttpVerificationGateway;
pub use twilio::TwilioVerifyGateway;

#[cfg(test)]
mod tests;

/// Create the gateway selected by the provider configuration
pub fn create_verification_gateway(
    config: &ProviderConfig,
) -> Result<Arc<dyn VerificationGateway>, InfrastructureError> {
    match config.kind {
        ProviderKind::Twilio => {
            let gateway = TwilioVerifyGateway::new(config)?;
            tracing::info!(
                base_url = %config.base_url,
                event = "gateway_initialized",
                "Using Twilio Verify gateway"
            );
            Ok(Arc::new(gateway))
        }
        ProviderKind::Mock => {
            tracing::warn!(
                event = "gateway_initialized",
                "Using console verification gateway; codes are logged, not sent"
            );
            Ok(Arc::new(ConsoleVerificationGateway::new(config.mock_code.clone())))
        }
    }
}
