//! Development gateway: prints codes to the log instead of sending them

use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::RwLock;

use pv_core::domain::entities::{Channel, PhoneNumber};
use pv_core::errors::ProviderError;
use pv_core::services::{CheckOutcome, StartOutcome, VerificationGateway};

/// Approves one fixed code for any phone that has been sent a code
pub struct ConsoleVerificationGateway {
    code: String,
    started: RwLock<HashSet<PhoneNumber>>,
}

impl ConsoleVerificationGateway {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            started: RwLock::new(HashSet::new()),
        }
    }
}

#[async_trait]
impl VerificationGateway for ConsoleVerificationGateway {
    async fn start_verification(
        &self,
        phone: &PhoneNumber,
        channel: Channel,
    ) -> Result<StartOutcome, ProviderError> {
        self.started.write().await.insert(phone.clone());
        tracing::warn!(
            phone = %phone.masked(),
            channel = %channel,
            code = %self.code,
            event = "console_code_sent",
            "Development gateway: verification code not delivered"
        );
        Ok(StartOutcome::pending(None))
    }

    async fn check_verification(
        &self,
        phone: &PhoneNumber,
        code: &str,
    ) -> Result<CheckOutcome, ProviderError> {
        let mut started = self.started.write().await;
        if started.contains(phone) && code == self.code {
            started.remove(phone);
            Ok(CheckOutcome::Approved)
        } else {
            Ok(CheckOutcome::Denied)
        }
    }
}
