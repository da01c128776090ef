//! Profile entities as read from and written to the external profile store.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::phone_number::PhoneNumber;

/// The identity returned by the authentication backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Unique identifier, also the primary key of the profile record
    pub id: Uuid,

    #[serde(default)]
    pub email: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: Uuid) -> Self {
        Self { id, email: None }
    }
}

/// A user's profile record.
///
/// Only the fields the verification subsystem reads are modelled; the store
/// may hold more columns, which are preserved because writes from this crate
/// never send a full record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,

    #[serde(default)]
    pub full_name: Option<String>,

    /// Phone in E.164 form, as last saved
    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub college: Option<String>,

    #[serde(default)]
    pub gender_preference: Option<String>,

    /// Set by the profile-completion step
    #[serde(default, deserialize_with = "null_as_false")]
    pub profile_completed: bool,

    /// Set by [`crate::services::ProfileSync`] after an approved check
    #[serde(default, deserialize_with = "null_as_false")]
    pub phone_verified: bool,
}

/// Nullable boolean columns read as `false` when unset
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl Profile {
    /// Creates an empty profile for a user
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            full_name: None,
            phone: None,
            role: None,
            college: None,
            gender_preference: None,
            profile_completed: false,
            phone_verified: false,
        }
    }

    /// Whether the profile-completion prerequisite is met
    pub fn is_complete(&self) -> bool {
        self.profile_completed
    }

    /// Apply a verification record, leaving every other field untouched
    pub fn apply_verification(&mut self, record: &ProfileVerificationRecord) {
        self.phone = Some(record.phone.to_string());
        self.phone_verified = record.phone_verified;
    }
}

/// The durable verified fact, merged into the profile keyed by user id.
///
/// Serialized with the store's column names: `{id, phone, phone_verified}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileVerificationRecord {
    #[serde(rename = "id")]
    pub user_id: Uuid,

    pub phone: PhoneNumber,

    pub phone_verified: bool,
}

impl ProfileVerificationRecord {
    /// Record stating that `phone` is verified for `user_id`
    pub fn verified(user_id: Uuid, phone: PhoneNumber) -> Self {
        Self {
            user_id,
            phone,
            phone_verified: true,
        }
    }
}
