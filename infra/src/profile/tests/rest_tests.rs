use uuid::Uuid;

use pv_core::domain::entities::{PhoneNumber, ProfileVerificationRecord};
use pv_core::errors::DomainError;
use pv_core::repositories::{IdentityProvider, ProfileStore};
use pv_shared::config::ProfileStoreConfig;

use crate::profile::rest_store::decode_profile_rows;
use crate::profile::{RestIdentityProvider, RestProfileStore};

fn config(url: &str) -> ProfileStoreConfig {
    ProfileStoreConfig {
        url: url.to_string(),
        api_key: "anon-key".to_string(),
        table: "profiles".to_string(),
        timeout_secs: 2,
    }
}

#[test]
fn test_store_urls() {
    let store = RestProfileStore::new(&config("https://project.supabase.co")).unwrap();
    let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();

    assert_eq!(
        store.profile_url(id),
        "https://project.supabase.co/rest/v1/profiles?id=eq.550e8400-e29b-41d4-a716-446655440000&select=*"
    );
    assert_eq!(store.upsert_url(), "https://project.supabase.co/rest/v1/profiles");
}

#[test]
fn test_identity_url() {
    let identity = RestIdentityProvider::new(&config("https://project.supabase.co"), None).unwrap();
    assert_eq!(identity.user_url(), "https://project.supabase.co/auth/v1/user");
}

#[tokio::test]
async fn test_identity_without_token_is_anonymous() {
    let identity =
        RestIdentityProvider::new(&config("http://127.0.0.1:1"), Some("  ".to_string())).unwrap();
    assert_eq!(identity.current_user().await.unwrap(), None);
}

#[tokio::test]
async fn test_unreachable_store_is_an_error() {
    let store = RestProfileStore::new(&config("http://127.0.0.1:1"))
        .unwrap()
        .with_access_token("user-jwt");
    let record = ProfileVerificationRecord::verified(
        Uuid::new_v4(),
        PhoneNumber::parse_e164("+919876543210").unwrap(),
    );

    let err = store.upsert_verification(&record).await.unwrap_err();
    assert!(matches!(err, DomainError::Internal { .. }));
    assert!(store.get_profile(record.user_id).await.is_err());
}

#[test]
fn test_fresh_row_with_null_flags_decodes() {
    let body = r#"[{"id":"550e8400-e29b-41d4-a716-446655440000","full_name":null,"phone":null,"role":null,"college":null,"gender_preference":null,"profile_completed":null,"phone_verified":null,"created_at":"2024-06-01T09:00:00+00:00"}]"#;

    let profile = decode_profile_rows(body).unwrap().expect("one row");
    assert!(!profile.is_complete());
    assert!(!profile.phone_verified);
}

#[test]
fn test_empty_select_is_no_profile() {
    assert!(decode_profile_rows("[]").unwrap().is_none());
}
