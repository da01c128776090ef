//! Profile store trait defining access to the external user-profile records.
//!
//! The profile store is owned by another system; this crate only reads a
//! user's profile to evaluate prerequisites and merges the verified phone
//! back into it.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Profile, ProfileVerificationRecord};
use crate::errors::DomainResult;

/// Repository trait for profile records keyed by user id
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a profile by user id
    ///
    /// # Returns
    /// * `Ok(Some(Profile))` - Profile found
    /// * `Ok(None)` - The user has no profile record yet
    /// * `Err(DomainError)` - The store could not be read
    async fn get_profile(&self, user_id: Uuid) -> DomainResult<Option<Profile>>;

    /// Merge a verification record into the profile
    ///
    /// Implementations must write only `phone` and `phone_verified`, creating
    /// the record if it does not exist. Applying the same record twice leaves
    /// the store in the same state as applying it once.
    async fn upsert_verification(&self, record: &ProfileVerificationRecord) -> DomainResult<()>;
}
