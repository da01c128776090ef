use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::entities::{PhoneNumber, ProfileVerificationRecord};
use crate::errors::SyncError;
use crate::repositories::ProfileStore;

/// Writes the verified fact `{id, phone, phone_verified: true}` to the store.
///
/// The write is a targeted merge: no other profile field is sent, so fields
/// edited elsewhere are never overwritten. Committing the same phone twice is
/// harmless.
pub struct ProfileSync {
    store: Arc<dyn ProfileStore>,
    timeout: Duration,
}

impl ProfileSync {
    pub fn new(store: Arc<dyn ProfileStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn commit_verified(&self, user_id: Uuid, phone: &PhoneNumber) -> Result<(), SyncError> {
        let record = ProfileVerificationRecord::verified(user_id, phone.clone());

        match tokio::time::timeout(self.timeout, self.store.upsert_verification(&record)).await {
            Ok(Ok(())) => {
                tracing::info!(
                    user_id = %user_id,
                    phone = %phone.masked(),
                    event = "phone_verified_saved",
                    "Verified phone saved to profile"
                );
                Ok(())
            }
            Ok(Err(e)) => {
                tracing::error!(
                    user_id = %user_id,
                    phone = %phone.masked(),
                    error = %e,
                    event = "phone_verified_save_failed",
                    "Failed to save verified phone"
                );
                Err(SyncError::Store {
                    message: e.to_string(),
                })
            }
            Err(_) => {
                tracing::error!(
                    user_id = %user_id,
                    phone = %phone.masked(),
                    timeout_secs = self.timeout.as_secs(),
                    event = "phone_verified_save_timeout",
                    "Profile store did not answer in time"
                );
                Err(SyncError::Timeout {
                    seconds: self.timeout.as_secs(),
                })
            }
        }
    }
}
