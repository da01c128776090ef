use actix_web::{web, HttpResponse};
use validator::Validate;

use pv_core::domain::entities::PhoneNumber;
use pv_core::services::CheckOutcome;
use pv_shared::types::{CheckVerificationResponse, INVALID_OTP_MESSAGE};

use super::AppState;
use crate::dto::verification::{
    first_message, CheckVerificationRequest, E164_FORMAT_MESSAGE, PHONE_AND_CODE_REQUIRED_MESSAGE,
};
use crate::handlers::ApiError;

/// Handler for POST /api/check-verification
///
/// # Request Body
///
/// ```json
/// { "phone": "+919876543210", "code": "123456" }
/// ```
///
/// # Responses
/// - `200 {"success": true}` when the provider approves the code
/// - `400 {"error": "Invalid OTP"}` when it does not
/// - `400 {"error": "Phone and OTP required"}` when a field is missing
/// - `500 {"error": "OTP verification failed"}` when the provider fails
pub async fn check_verification(
    state: web::Data<AppState>,
    request: web::Json<CheckVerificationRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return Err(ApiError::bad_request(first_message(
            &errors,
            PHONE_AND_CODE_REQUIRED_MESSAGE,
        )));
    }

    let phone = PhoneNumber::parse_e164(request.phone.as_deref().unwrap_or_default())
        .map_err(|_| ApiError::bad_request(E164_FORMAT_MESSAGE))?;
    let code = request.code.as_deref().unwrap_or_default().trim();

    match state.gateway.check_verification(&phone, code).await {
        Ok(CheckOutcome::Approved) => {
            log::info!("Verification approved for {}", phone.masked());
            Ok(HttpResponse::Ok().json(CheckVerificationResponse::approved()))
        }
        Ok(CheckOutcome::Denied) => {
            log::info!("Verification code denied for {}", phone.masked());
            Err(ApiError::bad_request(INVALID_OTP_MESSAGE))
        }
        Err(error) => {
            log::error!(
                "Verification check failed for {}: {} ({:?})",
                phone.masked(),
                error,
                error.kind
            );
            Err(ApiError::from_check_failure(&error))
        }
    }
}
