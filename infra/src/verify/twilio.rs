//! Twilio Verify v2 gateway
//!
//! Twilio generates, delivers and checks the codes; this gateway only maps
//! its answers onto the provider contract:
//!
//! - start: `status == "pending"` is success, any other status is ambiguous
//! - check: `status == "approved"` is approval, any other status (and a 404
//!   for an expired or already used verification) is a denial
//! - error codes 60200, 21211 and 21614 mean the number itself is unusable

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use pv_core::domain::entities::{Channel, PhoneNumber};
use pv_core::errors::{ProviderError, ProviderErrorKind};
use pv_core::services::{CheckOutcome, StartOutcome, VerificationGateway};
use pv_shared::config::ProviderConfig;

use crate::{build_http_client, transport_error, InfrastructureError};

/// Twilio error codes that mean the phone number is invalid or unreachable
const INVALID_PHONE_CODES: [u32; 3] = [60200, 21211, 21614];

const DEFAULT_START_ERROR: &str = "Failed to send OTP";
const DEFAULT_CHECK_ERROR: &str = "OTP verification failed";

/// Verification resource as returned by both endpoints
#[derive(Debug, Deserialize)]
struct TwilioVerification {
    #[serde(default)]
    sid: Option<String>,
    status: String,
}

/// Error body returned by the Twilio REST API
#[derive(Debug, Default, Deserialize)]
struct TwilioErrorBody {
    #[serde(default)]
    code: Option<u32>,
    #[serde(default)]
    message: Option<String>,
}

/// Twilio Verify gateway
pub struct TwilioVerifyGateway {
    client: reqwest::Client,
    account_sid: String,
    auth_token: String,
    verifications_url: String,
    check_url: String,
    timeout_secs: u64,
}

impl TwilioVerifyGateway {
    pub fn new(config: &ProviderConfig) -> Result<Self, InfrastructureError> {
        if config.account_sid.is_empty() || config.auth_token.is_empty() {
            return Err(InfrastructureError::Config(
                "Twilio credentials are not configured".to_string(),
            ));
        }
        if config.service_sid.is_empty() {
            return Err(InfrastructureError::Config(
                "Verify service SID is not configured".to_string(),
            ));
        }

        let service_url = format!("{}/v2/Services/{}", config.base_url, config.service_sid);
        Ok(Self {
            client: build_http_client(config.timeout_secs)?,
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            verifications_url: format!("{}/Verifications", service_url),
            check_url: format!("{}/VerificationCheck", service_url),
            timeout_secs: config.timeout_secs,
        })
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<(StatusCode, String), ProviderError> {
        let response = self
            .client
            .post(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(form)
            .send()
            .await
            .map_err(|e| transport_error(&e, self.timeout_secs))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&e, self.timeout_secs))?;
        Ok((status, body))
    }
}

#[async_trait]
impl VerificationGateway for TwilioVerifyGateway {
    async fn start_verification(
        &self,
        phone: &PhoneNumber,
        channel: Channel,
    ) -> Result<StartOutcome, ProviderError> {
        let (status, body) = self
            .post_form(
                &self.verifications_url,
                &[("To", phone.as_str()), ("Channel", channel.as_str())],
            )
            .await?;

        let result = map_start_response(status, &body);
        match &result {
            Ok(outcome) => tracing::info!(
                phone = %phone.masked(),
                channel = %channel,
                sid = outcome.sid.as_deref().unwrap_or("-"),
                event = "twilio_verification_started",
                "Twilio verification started"
            ),
            Err(e) => tracing::error!(
                phone = %phone.masked(),
                http_status = status.as_u16(),
                code = e.code.as_deref().unwrap_or("-"),
                error = %e,
                event = "twilio_start_failed",
                "Twilio rejected verification start"
            ),
        }
        result
    }

    async fn check_verification(
        &self,
        phone: &PhoneNumber,
        code: &str,
    ) -> Result<CheckOutcome, ProviderError> {
        let (status, body) = self
            .post_form(&self.check_url, &[("To", phone.as_str()), ("Code", code)])
            .await?;

        let result = map_check_response(status, &body);
        match &result {
            Ok(CheckOutcome::Approved) => tracing::info!(
                phone = %phone.masked(),
                event = "twilio_check_approved",
                "Twilio approved verification code"
            ),
            Ok(CheckOutcome::Denied) => tracing::info!(
                phone = %phone.masked(),
                http_status = status.as_u16(),
                event = "twilio_check_denied",
                "Twilio denied verification code"
            ),
            Err(e) => tracing::error!(
                phone = %phone.masked(),
                http_status = status.as_u16(),
                code = e.code.as_deref().unwrap_or("-"),
                error = %e,
                event = "twilio_check_failed",
                "Twilio verification check failed"
            ),
        }
        result
    }
}

/// Map a start response onto the provider contract
pub(crate) fn map_start_response(status: StatusCode, body: &str) -> Result<StartOutcome, ProviderError> {
    if !status.is_success() {
        return Err(map_error(status, body, DEFAULT_START_ERROR));
    }

    let verification: TwilioVerification = serde_json::from_str(body).map_err(|_| {
        ProviderError::new(
            ProviderErrorKind::Ambiguous,
            "Unreadable response from verification service",
        )
    })?;

    if verification.status == "pending" {
        Ok(StartOutcome::pending(verification.sid))
    } else {
        Err(ProviderError::new(
            ProviderErrorKind::Ambiguous,
            format!("Unexpected verification status: {}", verification.status),
        ))
    }
}

/// Map a check response onto the provider contract
pub(crate) fn map_check_response(status: StatusCode, body: &str) -> Result<CheckOutcome, ProviderError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(CheckOutcome::Denied);
    }
    if !status.is_success() {
        return Err(map_error(status, body, DEFAULT_CHECK_ERROR));
    }

    let verification: TwilioVerification = serde_json::from_str(body).map_err(|_| {
        ProviderError::new(
            ProviderErrorKind::Ambiguous,
            "Unreadable response from verification service",
        )
    })?;

    if verification.status == "approved" {
        Ok(CheckOutcome::Approved)
    } else {
        Ok(CheckOutcome::Denied)
    }
}

fn map_error(status: StatusCode, body: &str, fallback: &str) -> ProviderError {
    let parsed: TwilioErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());

    let kind = match parsed.code {
        Some(code) if INVALID_PHONE_CODES.contains(&code) => ProviderErrorKind::InvalidPhone,
        _ if status.is_client_error() => ProviderErrorKind::Rejected,
        _ => ProviderErrorKind::Unavailable,
    };

    let error = ProviderError::new(kind, message);
    match parsed.code {
        Some(code) => error.with_code(code.to_string()),
        None => error,
    }
}
