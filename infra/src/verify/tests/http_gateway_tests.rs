//! Response mapping tests for the HTTP verification gateway

use reqwest::StatusCode;

use pv_core::domain::entities::{Channel, PhoneNumber};
use pv_core::errors::ProviderErrorKind;
use pv_core::services::{CheckOutcome, VerificationGateway};
use pv_shared::config::VerificationConfig;

use crate::verify::http_gateway::{map_check_response, map_start_response, HttpVerificationGateway};

#[test]
fn test_start_success() {
    let outcome = map_start_response(StatusCode::OK, r#"{"success":true,"status":"pending"}"#);
    assert!(outcome.is_ok());
}

#[test]
fn test_start_bad_request_is_invalid_phone() {
    let body = r#"{"error":"Phone must be in E.164 format, e.g. +919876543210"}"#;
    let err = map_start_response(StatusCode::BAD_REQUEST, body).unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::InvalidPhone);
    assert!(err.message.contains("E.164"));
}

#[test]
fn test_start_server_error_keeps_code() {
    let body = r#"{"error":"Service unavailable","code":"20503"}"#;
    let err = map_start_response(StatusCode::INTERNAL_SERVER_ERROR, body).unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::Unavailable);
    assert_eq!(err.message, "Service unavailable");
    assert_eq!(err.code.as_deref(), Some("20503"));
}

#[test]
fn test_start_undecodable_body_is_ambiguous() {
    let err = map_start_response(StatusCode::OK, "not json").unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::Ambiguous);
}

#[test]
fn test_check_mapping() {
    assert_eq!(
        map_check_response(StatusCode::OK, r#"{"success":true}"#),
        Ok(CheckOutcome::Approved)
    );
    assert_eq!(
        map_check_response(StatusCode::BAD_REQUEST, r#"{"error":"Invalid OTP"}"#),
        Ok(CheckOutcome::Denied)
    );

    let err = map_check_response(StatusCode::BAD_REQUEST, r#"{"error":"Phone and OTP required"}"#)
        .unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::Rejected);

    let err = map_check_response(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"OTP verification failed"}"#)
        .unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::Unavailable);

    let err = map_check_response(StatusCode::OK, r#"{"success":false}"#).unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::Ambiguous);
}

#[tokio::test]
async fn test_unreachable_server_is_unavailable() {
    let gateway = HttpVerificationGateway::new("http://127.0.0.1:1/", 2).unwrap();
    let phone = PhoneNumber::parse_e164("+919876543210").unwrap();

    let err = gateway
        .start_verification(&phone, Channel::Sms)
        .await
        .unwrap_err();
    assert!(matches!(
        err.kind,
        ProviderErrorKind::Unavailable | ProviderErrorKind::Timeout
    ));
}

#[test]
fn test_from_config_uses_api_base_url() {
    let config = VerificationConfig {
        api_base_url: "https://verify.example.com".to_string(),
        ..VerificationConfig::default()
    };
    let gateway = HttpVerificationGateway::from_config(&config).unwrap();
    assert_eq!(gateway.base_url(), "https://verify.example.com");
}
