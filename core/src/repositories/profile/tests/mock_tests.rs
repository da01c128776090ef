use uuid::Uuid;

use crate::domain::entities::{PhoneNumber, Profile, ProfileVerificationRecord};
use crate::errors::DomainError;
use crate::repositories::profile::{MockProfileStore, ProfileStore};

fn record(user_id: Uuid) -> ProfileVerificationRecord {
    ProfileVerificationRecord::verified(user_id, PhoneNumber::parse_e164("+919876543210").unwrap())
}

#[tokio::test]
async fn test_upsert_creates_missing_profile() {
    let store = MockProfileStore::new();
    let user_id = Uuid::new_v4();

    store.upsert_verification(&record(user_id)).await.unwrap();

    let profile = store.get_profile(user_id).await.unwrap().unwrap();
    assert!(profile.phone_verified);
    assert_eq!(profile.phone.as_deref(), Some("+919876543210"));
}

#[tokio::test]
async fn test_upsert_merges_and_is_idempotent() {
    let store = MockProfileStore::new();
    let mut existing = Profile::new(Uuid::new_v4());
    existing.full_name = Some("Asha Rao".to_string());
    existing.profile_completed = true;
    store.insert(existing.clone()).await;

    store.upsert_verification(&record(existing.id)).await.unwrap();
    let once = store.profile(existing.id).await.unwrap();
    store.upsert_verification(&record(existing.id)).await.unwrap();
    let twice = store.profile(existing.id).await.unwrap();

    assert_eq!(once, twice);
    assert_eq!(twice.full_name.as_deref(), Some("Asha Rao"));
    assert!(twice.profile_completed);
    assert_eq!(store.upsert_count().await, 2);
}

#[tokio::test]
async fn test_injected_failures_leave_store_untouched() {
    let store = MockProfileStore::new();
    let user_id = Uuid::new_v4();
    store.fail_next_upserts(1);

    let err = store.upsert_verification(&record(user_id)).await.unwrap_err();
    assert!(matches!(err, DomainError::Internal { .. }));
    assert!(store.profile(user_id).await.is_none());
    assert_eq!(store.upsert_count().await, 0);

    store.upsert_verification(&record(user_id)).await.unwrap();
    assert_eq!(store.upsert_count().await, 1);
}

#[tokio::test]
async fn test_failing_reads() {
    let store = MockProfileStore::with_failing_reads();
    assert!(store.get_profile(Uuid::new_v4()).await.is_err());
}
