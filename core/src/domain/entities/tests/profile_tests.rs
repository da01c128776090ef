//! Tests for profile entities

use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::{PhoneNumber, Profile, ProfileVerificationRecord};

#[test]
fn test_new_profile_is_incomplete_and_unverified() {
    let profile = Profile::new(Uuid::new_v4());
    assert!(!profile.is_complete());
    assert!(!profile.phone_verified);
}

#[test]
fn test_null_flags_decode_as_false() {
    let id = Uuid::new_v4();
    let rows = json!([{
        "id": id.to_string(),
        "full_name": "Asha Rao",
        "phone": null,
        "role": null,
        "profile_completed": null,
        "phone_verified": null
    }]);

    let profiles: Vec<Profile> = serde_json::from_value(rows).unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].id, id);
    assert!(!profiles[0].profile_completed);
    assert!(!profiles[0].phone_verified);
    assert!(profiles[0].phone.is_none());
}

#[test]
fn test_missing_flags_decode_as_false() {
    let profile: Profile = serde_json::from_value(json!({ "id": Uuid::new_v4().to_string() })).unwrap();
    assert!(!profile.is_complete());
    assert!(!profile.phone_verified);
}

#[test]
fn test_apply_verification_touches_only_phone_fields() {
    let mut profile = Profile::new(Uuid::new_v4());
    profile.full_name = Some("Asha Rao".to_string());
    profile.profile_completed = true;

    let phone = PhoneNumber::parse_e164("+919876543210").unwrap();
    let record = ProfileVerificationRecord::verified(profile.id, phone);
    profile.apply_verification(&record);

    assert_eq!(profile.phone.as_deref(), Some("+919876543210"));
    assert!(profile.phone_verified);
    assert_eq!(profile.full_name.as_deref(), Some("Asha Rao"));
    assert!(profile.profile_completed);
}

#[test]
fn test_verification_record_uses_store_column_names() {
    let user_id = Uuid::new_v4();
    let phone = PhoneNumber::parse_e164("+919876543210").unwrap();
    let record = ProfileVerificationRecord::verified(user_id, phone);

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(
        value,
        json!({
            "id": user_id.to_string(),
            "phone": "+919876543210",
            "phone_verified": true
        })
    );
}

#[test]
fn test_profile_deserializes_with_missing_columns() {
    let id = Uuid::new_v4();
    let profile: Profile = serde_json::from_value(json!({
        "id": id.to_string(),
        "profile_completed": true,
        "avatar_url": "https://example.com/a.png"
    }))
    .unwrap();

    assert_eq!(profile.id, id);
    assert!(profile.is_complete());
    assert!(!profile.phone_verified);
    assert!(profile.phone.is_none());
}
