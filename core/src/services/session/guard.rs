use std::sync::Arc;

use crate::domain::entities::AuthenticatedUser;
use crate::errors::DomainResult;
use crate::repositories::{IdentityProvider, ProfileStore};
use crate::services::verification::{FlowDependencies, VerificationFlow};

/// Whether the current session may start a phone verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prerequisite {
    NotAuthenticated,
    /// No profile yet, or the profile step is not finished
    ProfileIncomplete,
    AlreadyVerified,
    ReadyToVerify(AuthenticatedUser),
}

impl Prerequisite {
    pub fn as_str(&self) -> &'static str {
        match self {
            Prerequisite::NotAuthenticated => "not_authenticated",
            Prerequisite::ProfileIncomplete => "profile_incomplete",
            Prerequisite::AlreadyVerified => "already_verified",
            Prerequisite::ReadyToVerify(_) => "ready_to_verify",
        }
    }
}

/// Result of [`SessionGuard::begin`]
pub enum Admission {
    Ready(VerificationFlow),
    Blocked(Prerequisite),
}

/// Resolves the signed-in user and their profile before verification
pub struct SessionGuard {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
}

impl SessionGuard {
    pub fn new(identity: Arc<dyn IdentityProvider>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { identity, profiles }
    }

    /// Collaborator failures are returned as errors so the caller can retry
    pub async fn check_prerequisites(&self) -> DomainResult<Prerequisite> {
        let user = match self.identity.current_user().await? {
            Some(user) => user,
            None => return Ok(Prerequisite::NotAuthenticated),
        };

        let prerequisite = match self.profiles.get_profile(user.id).await? {
            None => Prerequisite::ProfileIncomplete,
            Some(profile) if !profile.is_complete() => Prerequisite::ProfileIncomplete,
            Some(profile) if profile.phone_verified => Prerequisite::AlreadyVerified,
            Some(_) => Prerequisite::ReadyToVerify(user),
        };

        tracing::debug!(
            outcome = prerequisite.as_str(),
            event = "verification_prerequisites_checked",
            "Checked verification prerequisites"
        );
        Ok(prerequisite)
    }

    /// Start a flow for the signed-in user, or report why one cannot start
    pub async fn begin(&self, deps: &FlowDependencies) -> DomainResult<Admission> {
        match self.check_prerequisites().await? {
            Prerequisite::ReadyToVerify(user) => {
                Ok(Admission::Ready(VerificationFlow::new(user.id, deps)))
            }
            blocked => Ok(Admission::Blocked(blocked)),
        }
    }
}
