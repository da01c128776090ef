//! Scripted verification gateway for tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::domain::entities::{Channel, PhoneNumber};
use crate::errors::ProviderError;

use super::traits::{CheckOutcome, StartOutcome, VerificationGateway};

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock gateway that records every call.
///
/// Scripted results are consumed first; once the script is empty, starts
/// succeed and a check is approved only for `approved_code`.
pub struct MockVerificationGateway {
    approved_code: String,
    delay: Option<Duration>,
    start_script: Mutex<VecDeque<Result<StartOutcome, ProviderError>>>,
    check_script: Mutex<VecDeque<Result<CheckOutcome, ProviderError>>>,
    starts: Mutex<Vec<(PhoneNumber, Channel)>>,
    checks: Mutex<Vec<(PhoneNumber, String)>>,
}

impl MockVerificationGateway {
    pub fn new(approved_code: impl Into<String>) -> Self {
        Self {
            approved_code: approved_code.into(),
            delay: None,
            start_script: Mutex::new(VecDeque::new()),
            check_script: Mutex::new(VecDeque::new()),
            starts: Mutex::new(Vec::new()),
            checks: Mutex::new(Vec::new()),
        }
    }

    /// Every call sleeps for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push_start_result(&self, result: Result<StartOutcome, ProviderError>) {
        locked(&self.start_script).push_back(result);
    }

    pub fn push_check_result(&self, result: Result<CheckOutcome, ProviderError>) {
        locked(&self.check_script).push_back(result);
    }

    pub fn start_calls(&self) -> Vec<(PhoneNumber, Channel)> {
        locked(&self.starts).clone()
    }

    pub fn check_calls(&self) -> Vec<(PhoneNumber, String)> {
        locked(&self.checks).clone()
    }

    pub fn start_count(&self) -> usize {
        locked(&self.starts).len()
    }

    pub fn check_count(&self) -> usize {
        locked(&self.checks).len()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for MockVerificationGateway {
    fn default() -> Self {
        Self::new("123456")
    }
}

#[async_trait]
impl VerificationGateway for MockVerificationGateway {
    async fn start_verification(
        &self,
        phone: &PhoneNumber,
        channel: Channel,
    ) -> Result<StartOutcome, ProviderError> {
        locked(&self.starts).push((phone.clone(), channel));
        self.pause().await;

        let scripted = locked(&self.start_script).pop_front();
        scripted.unwrap_or_else(|| Ok(StartOutcome::pending(Some(format!("VE{}", self.start_count())))))
    }

    async fn check_verification(
        &self,
        phone: &PhoneNumber,
        code: &str,
    ) -> Result<CheckOutcome, ProviderError> {
        locked(&self.checks).push((phone.clone(), code.to_string()));
        self.pause().await;

        let scripted = locked(&self.check_script).pop_front();
        scripted.unwrap_or_else(|| {
            if code == self.approved_code {
                Ok(CheckOutcome::Approved)
            } else {
                Ok(CheckOutcome::Denied)
            }
        })
    }
}
