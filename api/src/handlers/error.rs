//! Error responses for the verification endpoints
//!
//! Every failure is rendered as `{"error": "...", "code": "..."}` with the
//! code omitted when the provider did not supply one.

use actix_web::{
    error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError,
};
use thiserror::Error;

use pv_core::errors::{ProviderError, ProviderErrorKind};
use pv_shared::types::ApiErrorBody;

const START_FAILURE_MESSAGE: &str = "Failed to send OTP";
const CHECK_FAILURE_MESSAGE: &str = "OTP verification failed";

/// Error returned by the API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself is unusable
    #[error("{0}")]
    BadRequest(String),

    /// The provider refused the phone number
    #[error("{message}")]
    InvalidPhone {
        message: String,
        code: Option<String>,
    },

    /// The provider failed or could not be reached
    #[error("{message}")]
    Provider {
        message: String,
        code: Option<String>,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    /// Map a failed start onto a response error
    pub fn from_start_failure(error: &ProviderError) -> Self {
        let message = if error.message.trim().is_empty() {
            START_FAILURE_MESSAGE.to_string()
        } else {
            error.message.clone()
        };

        match error.kind {
            ProviderErrorKind::InvalidPhone => ApiError::InvalidPhone {
                message,
                code: error.code.clone(),
            },
            _ => ApiError::Provider {
                message,
                code: error.code.clone(),
            },
        }
    }

    /// Map a failed check onto a response error
    pub fn from_check_failure(error: &ProviderError) -> Self {
        ApiError::Provider {
            message: CHECK_FAILURE_MESSAGE.to_string(),
            code: error.code.clone(),
        }
    }

    fn body(&self) -> ApiErrorBody {
        match self {
            ApiError::BadRequest(message) => ApiErrorBody::new(message.clone()),
            ApiError::InvalidPhone { message, code } | ApiError::Provider { message, code } => {
                ApiErrorBody::new(message.clone()).with_code(code.clone())
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidPhone { .. } => StatusCode::BAD_REQUEST,
            ApiError::Provider { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

/// Render malformed JSON bodies as `400 {"error": ...}`
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected request body: {}", error);
    ApiError::bad_request(format!("Invalid request body: {}", error)).into()
}
