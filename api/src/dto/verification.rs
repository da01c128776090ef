use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

pub const PHONE_REQUIRED_MESSAGE: &str = "Phone number required";
pub const PHONE_AND_CODE_REQUIRED_MESSAGE: &str = "Phone and OTP required";
pub const E164_FORMAT_MESSAGE: &str = "Phone must be in E.164 format, e.g. +919876543210";

/// Body of `POST /api/start-verification`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct StartVerificationRequest {
    /// Phone number in E.164 form, e.g. "+919876543210"
    #[validate(required(message = "Phone number required"), length(min = 1, message = "Phone number required"))]
    pub phone: Option<String>,

    /// Delivery channel ("sms", "call" or "whatsapp"), defaults to sms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl StartVerificationRequest {
    pub fn sms(phone: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            channel: None,
        }
    }
}

/// Body of `POST /api/check-verification`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CheckVerificationRequest {
    /// Phone number the code was sent to, in E.164 form
    #[validate(required(message = "Phone and OTP required"), length(min = 1, message = "Phone and OTP required"))]
    pub phone: Option<String>,

    /// Code entered by the user
    #[validate(required(message = "Phone and OTP required"), length(min = 1, message = "Phone and OTP required"))]
    pub code: Option<String>,
}

impl CheckVerificationRequest {
    pub fn new(phone: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            code: Some(code.into()),
        }
    }
}

/// First message carried by a set of validation errors
pub fn first_message(errors: &ValidationErrors, fallback: &str) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_request_requires_phone() {
        let errors = StartVerificationRequest::default().validate().unwrap_err();
        assert_eq!(first_message(&errors, "fallback"), PHONE_REQUIRED_MESSAGE);

        let empty = StartVerificationRequest::sms("");
        let errors = empty.validate().unwrap_err();
        assert_eq!(first_message(&errors, "fallback"), PHONE_REQUIRED_MESSAGE);
    }

    #[test]
    fn test_start_request_channel_is_optional() {
        let request: StartVerificationRequest =
            serde_json::from_str(r#"{"phone":"+919876543210"}"#).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.channel.is_none());
    }

    #[test]
    fn test_check_request_requires_both_fields() {
        let missing_code: CheckVerificationRequest =
            serde_json::from_str(r#"{"phone":"+919876543210"}"#).unwrap();
        let errors = missing_code.validate().unwrap_err();
        assert_eq!(first_message(&errors, "fallback"), PHONE_AND_CODE_REQUIRED_MESSAGE);

        assert!(CheckVerificationRequest::new("+919876543210", "123456")
            .validate()
            .is_ok());
    }
}
