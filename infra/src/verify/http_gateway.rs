//! Gateway that calls the verification API exposed by `pv_api`

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

use pv_core::domain::entities::{Channel, PhoneNumber};
use pv_core::errors::{ProviderError, ProviderErrorKind};
use pv_core::services::{CheckOutcome, StartOutcome, VerificationGateway};
use pv_shared::config::VerificationConfig;
use pv_shared::types::{ApiErrorBody, CheckVerificationResponse, StartVerificationResponse};

use crate::{build_http_client, transport_error, InfrastructureError};

#[derive(Serialize)]
struct StartRequest<'a> {
    phone: &'a str,
    channel: &'a str,
}

#[derive(Serialize)]
struct CheckRequest<'a> {
    phone: &'a str,
    code: &'a str,
}

/// Client-side gateway over `POST /api/start-verification` and
/// `POST /api/check-verification`
pub struct HttpVerificationGateway {
    client: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl HttpVerificationGateway {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, InfrastructureError> {
        Ok(Self {
            client: build_http_client(timeout_secs)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    /// Gateway for the API at `api_base_url`, bounded by the client request timeout
    pub fn from_config(config: &VerificationConfig) -> Result<Self, InfrastructureError> {
        Self::new(config.api_base_url.clone(), config.request_timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<(StatusCode, String), ProviderError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(&e, self.timeout_secs))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(&e, self.timeout_secs))?;
        Ok((status, text))
    }
}

#[async_trait]
impl VerificationGateway for HttpVerificationGateway {
    async fn start_verification(
        &self,
        phone: &PhoneNumber,
        channel: Channel,
    ) -> Result<StartOutcome, ProviderError> {
        let request = StartRequest {
            phone: phone.as_str(),
            channel: channel.as_str(),
        };
        let (status, body) = self.post_json("/api/start-verification", &request).await?;

        tracing::debug!(
            phone = %phone.masked(),
            http_status = status.as_u16(),
            event = "api_start_verification",
            "Start verification answered"
        );
        map_start_response(status, &body)
    }

    async fn check_verification(
        &self,
        phone: &PhoneNumber,
        code: &str,
    ) -> Result<CheckOutcome, ProviderError> {
        let request = CheckRequest {
            phone: phone.as_str(),
            code,
        };
        let (status, body) = self.post_json("/api/check-verification", &request).await?;

        tracing::debug!(
            phone = %phone.masked(),
            http_status = status.as_u16(),
            event = "api_check_verification",
            "Check verification answered"
        );
        map_check_response(status, &body)
    }
}

pub(crate) fn map_start_response(status: StatusCode, body: &str) -> Result<StartOutcome, ProviderError> {
    if status == StatusCode::OK {
        return match serde_json::from_str::<StartVerificationResponse>(body) {
            Ok(response) if response.success && response.status == "pending" => {
                Ok(StartOutcome::pending(None))
            }
            _ => Err(ambiguous()),
        };
    }
    if status == StatusCode::BAD_REQUEST {
        return Err(error_from_body(ProviderErrorKind::InvalidPhone, body, "Invalid phone number"));
    }
    Err(error_for_status(status, body, "Failed to send OTP"))
}

pub(crate) fn map_check_response(status: StatusCode, body: &str) -> Result<CheckOutcome, ProviderError> {
    if status == StatusCode::OK {
        return match serde_json::from_str::<CheckVerificationResponse>(body) {
            Ok(response) if response.success => Ok(CheckOutcome::Approved),
            _ => Err(ambiguous()),
        };
    }
    if status == StatusCode::BAD_REQUEST {
        if let Ok(error) = serde_json::from_str::<ApiErrorBody>(body) {
            if error.is_invalid_otp() {
                return Ok(CheckOutcome::Denied);
            }
        }
    }
    Err(error_for_status(status, body, "OTP verification failed"))
}

fn error_for_status(status: StatusCode, body: &str, fallback: &str) -> ProviderError {
    let kind = if status.is_client_error() {
        ProviderErrorKind::Rejected
    } else if status.is_server_error() {
        ProviderErrorKind::Unavailable
    } else {
        ProviderErrorKind::Ambiguous
    };
    error_from_body(kind, body, fallback)
}

fn error_from_body(kind: ProviderErrorKind, body: &str, fallback: &str) -> ProviderError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => {
            let error = ProviderError::new(kind, parsed.error);
            match parsed.code {
                Some(code) => error.with_code(code),
                None => error,
            }
        }
        Err(_) => ProviderError::new(kind, fallback),
    }
}

fn ambiguous() -> ProviderError {
    ProviderError::new(
        ProviderErrorKind::Ambiguous,
        "Unreadable response from verification service",
    )
}
