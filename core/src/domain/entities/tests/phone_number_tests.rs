//! Tests for the PhoneNumber value type

use crate::domain::entities::PhoneNumber;
use crate::errors::ValidationError;

#[test]
fn test_parse_e164_accepts_canonical_numbers() {
    let phone = PhoneNumber::parse_e164("+919876543210").unwrap();
    assert_eq!(phone.as_str(), "+919876543210");
    assert_eq!(phone.to_string(), "+919876543210");

    let trimmed = PhoneNumber::parse_e164("  +14155550123 ").unwrap();
    assert_eq!(trimmed.as_str(), "+14155550123");
}

#[test]
fn test_parse_e164_rejects_missing_and_malformed() {
    assert_eq!(
        PhoneNumber::parse_e164("   "),
        Err(ValidationError::RequiredField {
            field: "phone".to_string()
        })
    );

    for raw in ["9876543210", "+0123456789", "+91 98765 43210", "+91abc"] {
        assert_eq!(
            PhoneNumber::parse_e164(raw),
            Err(ValidationError::InvalidFormat {
                field: "phone".to_string()
            }),
            "{raw} should be rejected"
        );
    }
}

#[test]
fn test_masked_hides_subscriber_digits() {
    let phone = PhoneNumber::parse_e164("+919876543210").unwrap();
    let masked = phone.masked();
    assert!(masked.ends_with("3210"));
    assert!(!masked.contains("98765"));
}

#[test]
fn test_serde_uses_plain_string_and_validates() {
    let phone = PhoneNumber::parse_e164("+919876543210").unwrap();
    let json = serde_json::to_string(&phone).unwrap();
    assert_eq!(json, "\"+919876543210\"");

    let parsed: PhoneNumber = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, phone);

    assert!(serde_json::from_str::<PhoneNumber>("\"12345\"").is_err());
}
