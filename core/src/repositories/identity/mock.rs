//! Static identity provider for tests

use async_trait::async_trait;

use crate::domain::entities::AuthenticatedUser;
use crate::errors::{DomainError, DomainResult};

use super::trait_::IdentityProvider;

/// Returns a fixed identity, no identity, or an error
pub struct MockIdentityProvider {
    user: Option<AuthenticatedUser>,
    should_fail: bool,
}

impl MockIdentityProvider {
    pub fn signed_in(user: AuthenticatedUser) -> Self {
        Self {
            user: Some(user),
            should_fail: false,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user: None,
            should_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            user: None,
            should_fail: true,
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn current_user(&self) -> DomainResult<Option<AuthenticatedUser>> {
        if self.should_fail {
            return Err(DomainError::internal("identity backend unavailable"));
        }
        Ok(self.user.clone())
    }
}
