//! Client verification flow: phone entry, code entry, verified.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Channel, PhoneNumber, VerificationAttempt, VerificationStatus};
use crate::errors::{ProviderError, SyncError};
use crate::services::clock::Clock;
use crate::services::profile::ProfileSync;

use super::config::FlowConfig;
use super::countdown::Countdown;
use super::formatter::{validate_code, PhoneFormatter};
use super::throttle::ResendThrottle;
use super::traits::{CheckOutcome, VerificationGateway};
use super::types::{ClientFlowState, FlowEvent, FlowMessage, SyncState};

/// Collaborators shared by every flow of a process
#[derive(Clone)]
pub struct FlowDependencies {
    pub gateway: Arc<dyn VerificationGateway>,
    pub throttle: Arc<ResendThrottle>,
    pub profile_sync: Arc<ProfileSync>,
    pub clock: Arc<dyn Clock>,
    pub config: FlowConfig,
}

impl FlowDependencies {
    pub fn new(
        gateway: Arc<dyn VerificationGateway>,
        throttle: Arc<ResendThrottle>,
        profile_sync: Arc<ProfileSync>,
        clock: Arc<dyn Clock>,
        config: FlowConfig,
    ) -> Self {
        Self {
            gateway,
            throttle,
            profile_sync,
            clock,
            config,
        }
    }

    /// Collaborators with a throttle built from `config`
    pub fn from_config(
        gateway: Arc<dyn VerificationGateway>,
        profile_sync: Arc<ProfileSync>,
        clock: Arc<dyn Clock>,
        config: FlowConfig,
    ) -> Self {
        let throttle = Arc::new(ResendThrottle::from_config(&config, Arc::clone(&clock)));
        Self::new(gateway, throttle, profile_sync, clock, config)
    }
}

/// Read-only view of a flow's busy flag, for rendering a spinner
#[derive(Debug, Clone)]
pub struct BusyIndicator(Arc<AtomicBool>);

impl BusyIndicator {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Holds the busy flag for the lifetime of one network call.
///
/// Dropping the guard clears the flag, including when the future that owns it
/// is dropped mid-call.
struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn hold(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(Arc::clone(flag))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// One user's verification journey.
///
/// Actions take `&mut self`, so two actions can never overlap on the same
/// flow. Every gateway and store call is bounded by the configured timeout.
pub struct VerificationFlow {
    user_id: Uuid,
    state: ClientFlowState,
    phone_input: String,
    code_input: String,
    busy: Arc<AtomicBool>,
    formatter: PhoneFormatter,
    gateway: Arc<dyn VerificationGateway>,
    throttle: Arc<ResendThrottle>,
    profile_sync: Arc<ProfileSync>,
    clock: Arc<dyn Clock>,
    config: FlowConfig,
}

impl VerificationFlow {
    pub fn new(user_id: Uuid, deps: &FlowDependencies) -> Self {
        Self {
            user_id,
            state: ClientFlowState::CollectingPhone { message: None },
            phone_input: String::new(),
            code_input: String::new(),
            busy: Arc::new(AtomicBool::new(false)),
            formatter: PhoneFormatter::from_config(&deps.config),
            gateway: Arc::clone(&deps.gateway),
            throttle: Arc::clone(&deps.throttle),
            profile_sync: Arc::clone(&deps.profile_sync),
            clock: Arc::clone(&deps.clock),
            config: deps.config.clone(),
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn state(&self) -> &ClientFlowState {
        &self.state
    }

    /// Last phone text the user submitted
    pub fn phone_input(&self) -> &str {
        &self.phone_input
    }

    /// Code text currently in the input; cleared after a denial or a resend
    pub fn code_input(&self) -> &str {
        &self.code_input
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn busy_indicator(&self) -> BusyIndicator {
        BusyIndicator(Arc::clone(&self.busy))
    }

    /// Whole seconds until a resend is allowed; zero outside code entry
    pub fn resend_countdown(&self) -> u64 {
        self.state
            .attempt()
            .map_or(0, |attempt| attempt.seconds_until_resend(self.clock.now()))
    }

    /// Ticker for the resend button, when a code is outstanding
    pub fn countdown(&self) -> Option<Countdown> {
        self.state
            .attempt()
            .map(|attempt| Countdown::until(attempt.resend_available_at, self.clock.now()))
    }

    /// Submit phone digits and request an SMS code
    pub async fn submit_phone(&mut self, raw: &str) -> FlowEvent {
        self.submit_phone_via(raw, Channel::Sms).await
    }

    /// Submit phone digits and request a code over `channel`
    pub async fn submit_phone_via(&mut self, raw: &str, channel: Channel) -> FlowEvent {
        if self.is_busy() {
            return FlowEvent::Busy;
        }
        if !matches!(self.state, ClientFlowState::CollectingPhone { .. }) {
            return FlowEvent::Ignored;
        }
        self.phone_input = raw.to_string();

        let phone = match self.formatter.normalize(raw) {
            Ok(phone) => phone,
            Err(error) => {
                self.state = ClientFlowState::CollectingPhone {
                    message: Some(FlowMessage::Validation(error.clone())),
                };
                return FlowEvent::InvalidInput(error);
            }
        };

        if !self.throttle.can_send(&phone) {
            let seconds = self.cooldown_seconds(&phone);
            self.state = ClientFlowState::CollectingPhone {
                message: Some(FlowMessage::CooldownActive { seconds }),
            };
            return FlowEvent::CooldownActive {
                remaining_seconds: seconds,
            };
        }

        match self.start(&phone, channel).await {
            Ok(attempt) => self.enter_code_entry(attempt),
            Err(error) => {
                self.state = ClientFlowState::CollectingPhone {
                    message: Some(FlowMessage::Provider(error.clone())),
                };
                FlowEvent::ProviderFailed(error)
            }
        }
    }

    /// Submit the code the user received
    pub async fn submit_code(&mut self, code: &str) -> FlowEvent {
        if self.is_busy() {
            return FlowEvent::Busy;
        }
        let attempt = match &self.state {
            ClientFlowState::AwaitingCode { attempt, .. } => attempt.clone(),
            ClientFlowState::CollectingPhone { .. } | ClientFlowState::Verified { .. } => {
                return FlowEvent::Ignored;
            }
        };
        self.code_input = code.to_string();

        let code = match validate_code(code, self.config.code_length) {
            Ok(code) => code,
            Err(error) => {
                self.set_message(FlowMessage::Validation(error.clone()));
                return FlowEvent::InvalidInput(error);
            }
        };

        let phone = attempt.phone.clone();
        let gateway = Arc::clone(&self.gateway);
        let result = self
            .bounded(gateway.check_verification(&phone, &code))
            .await;

        match result {
            Ok(CheckOutcome::Approved) => {
                tracing::info!(
                    phone = %phone.masked(),
                    attempt_id = %attempt.id,
                    event = "verification_approved",
                    "Phone verification approved"
                );
                self.code_input.clear();
                self.state = ClientFlowState::Verified {
                    phone: phone.clone(),
                    sync: SyncState::Saving,
                };
                match self.save(phone).await {
                    Ok(()) => FlowEvent::Verified,
                    Err(error) => FlowEvent::SaveFailed(error),
                }
            }
            Ok(CheckOutcome::Denied) => {
                tracing::info!(
                    phone = %phone.masked(),
                    attempt_id = %attempt.id,
                    event = "verification_denied",
                    "Verification code denied"
                );
                self.code_input.clear();
                self.state = ClientFlowState::AwaitingCode {
                    attempt: VerificationAttempt {
                        status: VerificationStatus::Denied,
                        ..attempt
                    },
                    message: Some(FlowMessage::InvalidCode),
                };
                FlowEvent::InvalidCode
            }
            Err(error) => {
                tracing::warn!(
                    phone = %phone.masked(),
                    attempt_id = %attempt.id,
                    kind = ?error.kind,
                    error = %error,
                    event = "verification_check_failed",
                    "Verification check failed"
                );
                self.provider_failure(attempt, error)
            }
        }
    }

    /// Request a new code for the phone already entered
    pub async fn resend(&mut self) -> FlowEvent {
        if self.is_busy() {
            return FlowEvent::Busy;
        }
        let attempt = match &self.state {
            ClientFlowState::AwaitingCode { attempt, .. } => attempt.clone(),
            ClientFlowState::CollectingPhone { .. } | ClientFlowState::Verified { .. } => {
                return FlowEvent::Ignored;
            }
        };

        if !self.throttle.can_send(&attempt.phone) {
            return FlowEvent::CooldownActive {
                remaining_seconds: self.cooldown_seconds(&attempt.phone),
            };
        }

        match self.start(&attempt.phone, attempt.channel).await {
            Ok(replacement) => self.enter_code_entry(replacement),
            Err(error) => self.provider_failure(attempt, error),
        }
    }

    /// Abandon the outstanding code and go back to phone entry
    pub fn change_phone(&mut self) -> FlowEvent {
        if self.is_busy() {
            return FlowEvent::Busy;
        }
        match self.state {
            ClientFlowState::AwaitingCode { .. } => {
                self.code_input.clear();
                self.state = ClientFlowState::CollectingPhone { message: None };
                FlowEvent::PhoneEntryReopened
            }
            ClientFlowState::CollectingPhone { .. } | ClientFlowState::Verified { .. } => {
                FlowEvent::Ignored
            }
        }
    }

    /// Persist the verified phone again after a failed or interrupted write.
    ///
    /// Never contacts the verification provider.
    pub async fn retry_save(&mut self) -> FlowEvent {
        if self.is_busy() {
            return FlowEvent::Busy;
        }
        let phone = match &self.state {
            ClientFlowState::Verified { sync: SyncState::Saved, .. } => return FlowEvent::Ignored,
            ClientFlowState::Verified { phone, .. } => phone.clone(),
            ClientFlowState::CollectingPhone { .. } | ClientFlowState::AwaitingCode { .. } => {
                return FlowEvent::Ignored;
            }
        };

        match self.save(phone).await {
            Ok(()) => FlowEvent::Saved,
            Err(error) => FlowEvent::SaveFailed(error),
        }
    }

    async fn start(
        &self,
        phone: &PhoneNumber,
        channel: Channel,
    ) -> Result<VerificationAttempt, ProviderError> {
        let gateway = Arc::clone(&self.gateway);
        let outcome = self
            .bounded(gateway.start_verification(phone, channel))
            .await;

        match outcome {
            Ok(outcome) => {
                let started_at = self.clock.now();
                let resend_available_at = self.throttle.record_send(phone);
                let attempt =
                    VerificationAttempt::new(phone.clone(), channel, started_at, resend_available_at);
                tracing::info!(
                    phone = %phone.masked(),
                    channel = %channel,
                    attempt_id = %attempt.id,
                    sid = outcome.sid.as_deref().unwrap_or("-"),
                    event = "verification_started",
                    "Verification code sent"
                );
                Ok(attempt)
            }
            Err(error) => {
                tracing::warn!(
                    phone = %phone.masked(),
                    channel = %channel,
                    kind = ?error.kind,
                    error = %error,
                    event = "verification_start_failed",
                    "Failed to send verification code"
                );
                Err(error)
            }
        }
    }

    async fn save(&mut self, phone: PhoneNumber) -> Result<(), SyncError> {
        let result = {
            let _busy = BusyGuard::hold(&self.busy);
            self.profile_sync.commit_verified(self.user_id, &phone).await
        };

        let sync = match &result {
            Ok(()) => SyncState::Saved,
            Err(error) => SyncState::Failed {
                message: error.user_message().to_string(),
                reason: error.to_string(),
            },
        };
        self.state = ClientFlowState::Verified { phone, sync };
        result
    }

    /// Run a gateway call under the busy flag and the request timeout
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, ProviderError>>,
    ) -> Result<T, ProviderError> {
        let _busy = BusyGuard::hold(&self.busy);
        match tokio::time::timeout(self.config.request_timeout(), call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::timeout(self.config.request_timeout_seconds)),
        }
    }

    fn enter_code_entry(&mut self, attempt: VerificationAttempt) -> FlowEvent {
        let resend_available_at = attempt.resend_available_at;
        self.code_input.clear();
        self.state = ClientFlowState::AwaitingCode {
            attempt,
            message: None,
        };
        FlowEvent::CodeSent {
            resend_available_at,
        }
    }

    fn provider_failure(&mut self, attempt: VerificationAttempt, error: ProviderError) -> FlowEvent {
        self.state = if error.is_malformed_phone() {
            ClientFlowState::CollectingPhone {
                message: Some(FlowMessage::Provider(error.clone())),
            }
        } else {
            ClientFlowState::AwaitingCode {
                attempt: VerificationAttempt {
                    status: VerificationStatus::ProviderError,
                    ..attempt
                },
                message: Some(FlowMessage::Provider(error.clone())),
            }
        };
        FlowEvent::ProviderFailed(error)
    }

    fn set_message(&mut self, new_message: FlowMessage) {
        match &mut self.state {
            ClientFlowState::CollectingPhone { message }
            | ClientFlowState::AwaitingCode { message, .. } => *message = Some(new_message),
            ClientFlowState::Verified { .. } => {}
        }
    }

    fn cooldown_seconds(&self, phone: &PhoneNumber) -> u64 {
        let remaining = self.throttle.remaining(phone);
        let seconds = remaining.as_secs();
        if remaining.subsec_nanos() > 0 {
            seconds + 1
        } else {
            seconds
        }
    }
}
