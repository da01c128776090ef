//! In-memory implementation of ProfileStore for tests and local runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Profile, ProfileVerificationRecord};
use crate::errors::{DomainError, DomainResult};

use super::trait_::ProfileStore;

/// Mock profile store with failure injection and a write log
pub struct MockProfileStore {
    profiles: Arc<RwLock<HashMap<Uuid, Profile>>>,
    upserts: Arc<RwLock<Vec<ProfileVerificationRecord>>>,
    failing_upserts: AtomicUsize,
    fail_reads: bool,
}

impl MockProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
            upserts: Arc::new(RwLock::new(Vec::new())),
            failing_upserts: AtomicUsize::new(0),
            fail_reads: false,
        }
    }

    /// Store whose reads always fail
    pub fn with_failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::new()
        }
    }

    /// Make the next `count` upserts fail without touching the store
    pub fn fail_next_upserts(&self, count: usize) {
        self.failing_upserts.store(count, Ordering::SeqCst);
    }

    pub async fn insert(&self, profile: Profile) {
        self.profiles.write().await.insert(profile.id, profile);
    }

    pub async fn profile(&self, user_id: Uuid) -> Option<Profile> {
        self.profiles.read().await.get(&user_id).cloned()
    }

    /// Every upsert that reached the store, in order
    pub async fn upserts(&self) -> Vec<ProfileVerificationRecord> {
        self.upserts.read().await.clone()
    }

    pub async fn upsert_count(&self) -> usize {
        self.upserts.read().await.len()
    }
}

impl Default for MockProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for MockProfileStore {
    async fn get_profile(&self, user_id: Uuid) -> DomainResult<Option<Profile>> {
        if self.fail_reads {
            return Err(DomainError::internal("profile store unavailable"));
        }
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn upsert_verification(&self, record: &ProfileVerificationRecord) -> DomainResult<()> {
        let should_fail = self
            .failing_upserts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(DomainError::internal("profile store write rejected"));
        }

        let mut profiles = self.profiles.write().await;
        profiles
            .entry(record.user_id)
            .or_insert_with(|| Profile::new(record.user_id))
            .apply_verification(record);
        drop(profiles);

        self.upserts.write().await.push(record.clone());
        Ok(())
    }
}
