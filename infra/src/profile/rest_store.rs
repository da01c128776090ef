//! Profile store over PostgREST

use async_trait::async_trait;
use reqwest::StatusCode;
use uuid::Uuid;

use pv_core::domain::entities::{Profile, ProfileVerificationRecord};
use pv_core::errors::{DomainError, DomainResult};
use pv_core::repositories::ProfileStore;
use pv_shared::config::ProfileStoreConfig;

use crate::{build_http_client, InfrastructureError};

/// Asks PostgREST to merge into an existing row instead of failing on conflict
const MERGE_PREFERENCE: &str = "resolution=merge-duplicates,return=minimal";

/// Profile store backed by a PostgREST table
pub struct RestProfileStore {
    client: reqwest::Client,
    table_url: String,
    api_key: String,
    access_token: Option<String>,
}

impl RestProfileStore {
    pub fn new(config: &ProfileStoreConfig) -> Result<Self, InfrastructureError> {
        Ok(Self {
            client: build_http_client(config.timeout_secs)?,
            table_url: format!("{}/rest/v1/{}", config.url, config.table),
            api_key: config.api_key.clone(),
            access_token: None,
        })
    }

    /// Act on behalf of a signed-in user so row-level policies apply
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub(crate) fn profile_url(&self, user_id: Uuid) -> String {
        format!("{}?id=eq.{}&select=*", self.table_url, user_id)
    }

    pub(crate) fn upsert_url(&self) -> &str {
        &self.table_url
    }

    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.api_key)
    }
}

#[async_trait]
impl ProfileStore for RestProfileStore {
    async fn get_profile(&self, user_id: Uuid) -> DomainResult<Option<Profile>> {
        let response = self
            .client
            .get(self.profile_url(user_id))
            .header("apikey", &self.api_key)
            .bearer_auth(self.bearer())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(InfrastructureError::from)?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(DomainError::Unauthorized);
        }
        if !status.is_success() {
            tracing::error!(
                user_id = %user_id,
                http_status = status.as_u16(),
                event = "profile_read_failed",
                "Profile store read failed"
            );
            return Err(InfrastructureError::UnexpectedStatus {
                service: "profile store",
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.map_err(InfrastructureError::from)?;
        Ok(decode_profile_rows(&body)?)
    }

    async fn upsert_verification(&self, record: &ProfileVerificationRecord) -> DomainResult<()> {
        let response = self
            .client
            .post(self.upsert_url())
            .header("apikey", &self.api_key)
            .bearer_auth(self.bearer())
            .header("Prefer", MERGE_PREFERENCE)
            .json(record)
            .send()
            .await
            .map_err(InfrastructureError::from)?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(DomainError::Unauthorized);
        }
        if !status.is_success() {
            tracing::error!(
                user_id = %record.user_id,
                phone = %record.phone.masked(),
                http_status = status.as_u16(),
                event = "profile_upsert_failed",
                "Profile store rejected verification upsert"
            );
            return Err(InfrastructureError::UnexpectedStatus {
                service: "profile store",
                status: status.as_u16(),
            }
            .into());
        }

        tracing::debug!(
            user_id = %record.user_id,
            phone = %record.phone.masked(),
            event = "profile_upserted",
            "Verification merged into profile"
        );
        Ok(())
    }
}

/// First row of a PostgREST select, if any
pub(crate) fn decode_profile_rows(body: &str) -> Result<Option<Profile>, InfrastructureError> {
    let rows: Vec<Profile> = serde_json::from_str(body)?;
    Ok(rows.into_iter().next())
}
