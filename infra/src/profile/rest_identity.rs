//! Identity provider over the backend's auth endpoint

use async_trait::async_trait;
use reqwest::StatusCode;

use pv_core::domain::entities::AuthenticatedUser;
use pv_core::errors::DomainResult;
use pv_core::repositories::IdentityProvider;
use pv_shared::config::ProfileStoreConfig;

use crate::{build_http_client, InfrastructureError};

/// Resolves the user behind one session token
pub struct RestIdentityProvider {
    client: reqwest::Client,
    user_url: String,
    api_key: String,
    access_token: Option<String>,
}

impl RestIdentityProvider {
    /// `access_token` is `None` for a signed-out session
    pub fn new(
        config: &ProfileStoreConfig,
        access_token: Option<String>,
    ) -> Result<Self, InfrastructureError> {
        Ok(Self {
            client: build_http_client(config.timeout_secs)?,
            user_url: format!("{}/auth/v1/user", config.url),
            api_key: config.api_key.clone(),
            access_token: access_token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub(crate) fn user_url(&self) -> &str {
        &self.user_url
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    async fn current_user(&self) -> DomainResult<Option<AuthenticatedUser>> {
        let token = match &self.access_token {
            Some(token) => token,
            None => return Ok(None),
        };

        let response = self
            .client
            .get(&self.user_url)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(InfrastructureError::from)?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            tracing::debug!(event = "session_expired", "Session token rejected");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(InfrastructureError::UnexpectedStatus {
                service: "identity provider",
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.map_err(InfrastructureError::from)?;
        let user: AuthenticatedUser = serde_json::from_str(&body).map_err(InfrastructureError::from)?;
        Ok(Some(user))
    }
}
