use actix_web::{web, HttpResponse};
use validator::Validate;

use pv_core::domain::entities::{Channel, PhoneNumber};
use pv_shared::types::StartVerificationResponse;

use super::AppState;
use crate::dto::verification::{first_message, StartVerificationRequest, E164_FORMAT_MESSAGE, PHONE_REQUIRED_MESSAGE};
use crate::handlers::ApiError;

/// Handler for POST /api/start-verification
///
/// # Request Body
///
/// ```json
/// { "phone": "+919876543210", "channel": "sms" }
/// ```
///
/// # Responses
/// - `200 {"success": true, "status": "pending"}`
/// - `400 {"error": ...}` for a missing, malformed or provider-rejected number
/// - `500 {"error": ..., "code": ...}` when the provider fails
pub async fn start_verification(
    state: web::Data<AppState>,
    request: web::Json<StartVerificationRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return Err(ApiError::bad_request(first_message(&errors, PHONE_REQUIRED_MESSAGE)));
    }

    let raw_phone = request.phone.as_deref().unwrap_or_default();
    let phone = PhoneNumber::parse_e164(raw_phone)
        .map_err(|_| ApiError::bad_request(E164_FORMAT_MESSAGE))?;
    let channel = parse_channel(request.channel.as_deref())?;

    match state.gateway.start_verification(&phone, channel).await {
        Ok(outcome) => {
            log::info!(
                "Verification started for {} via {} (sid: {})",
                phone.masked(),
                channel,
                outcome.sid.as_deref().unwrap_or("-")
            );
            Ok(HttpResponse::Ok().json(StartVerificationResponse::pending()))
        }
        Err(error) => {
            log::error!(
                "Failed to start verification for {}: {} ({:?})",
                phone.masked(),
                error,
                error.kind
            );
            Err(ApiError::from_start_failure(&error))
        }
    }
}

/// Absent or blank channels default to SMS
fn parse_channel(raw: Option<&str>) -> Result<Channel, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Channel::Sms),
        Some(name) => name.parse::<Channel>().map_err(ApiError::BadRequest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channel_defaults_to_sms() {
        assert_eq!(parse_channel(None).unwrap(), Channel::Sms);
        assert_eq!(parse_channel(Some("  ")).unwrap(), Channel::Sms);
    }

    #[test]
    fn test_parse_channel_accepts_known_names() {
        assert_eq!(parse_channel(Some("call")).unwrap(), Channel::Call);
        assert_eq!(parse_channel(Some("WhatsApp")).unwrap(), Channel::Whatsapp);
    }

    #[test]
    fn test_parse_channel_rejects_unknown() {
        let error = parse_channel(Some("pigeon")).unwrap_err();
        assert!(matches!(error, ApiError::BadRequest(message) if message.contains("pigeon")));
    }
}
