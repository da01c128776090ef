//! Identity provider trait: the authentication backend's "who is signed in".

use async_trait::async_trait;

use crate::domain::entities::AuthenticatedUser;
use crate::errors::DomainResult;

/// Resolves the identity bound to the current session
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Ok(None)` when nobody is signed in or the session has expired
    async fn current_user(&self) -> DomainResult<Option<AuthenticatedUser>>;
}
