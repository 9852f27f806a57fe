//! Sign-in/sign-out flows and the cached session read side.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

use backoffice_auth::{Identity, RoleSet};
use backoffice_core::{SessionId, TeamId, UserId};

use crate::provider::{
    AccountPrefs, AuthProvider, MfaChallenge, MfaFactor, ProviderError, ProviderSession,
};
use crate::session::Session;

/// Membership listing page size, matching the provider's default cap.
const MEMBERSHIP_PAGE_LIMIT: u64 = 25;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Provider authenticated the user but the dashboard team grants no roles.
    /// The just-created session is torn down before this is returned.
    #[error("user has no roles assigned")]
    NoRolesAssigned,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Outcome of a sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignIn {
    /// Fully signed in with a role-resolved identity.
    Complete(Session),

    /// The provider demands a second factor; complete with
    /// [`SessionManager::complete_mfa_challenge`].
    MfaRequired { session: ProviderSession },

    /// The account is flagged as MFA-required but has not enrolled yet.
    MfaSetupRequired { session: ProviderSession },
}

/// Read side consumed by the route guard: "who, if anyone, is signed in?"
///
/// Kept as a trait so guard tests can script identities without a provider.
#[async_trait]
pub trait IdentitySource: Send + Sync {
    /// `Ok(None)` means no valid session (including "session exists but is
    /// not usable"); `Err` is reserved for transport-level failure, which
    /// callers must also treat as unauthenticated.
    async fn current_identity(&self) -> Result<Option<Identity>, SessionError>;
}

/// Owns the current [`Session`] and serializes its lifecycle.
///
/// Sign-in and sign-out mutate the held session; everything else only reads
/// it. The cached copy is what lets many guard/menu evaluations during one
/// render pass avoid re-validating against the provider.
pub struct SessionManager {
    provider: Arc<dyn AuthProvider>,
    team_id: TeamId,
    current: Mutex<Option<Session>>,
}

impl SessionManager {
    /// `team_id` is the dashboard team whose memberships carry role grants.
    pub fn new(provider: Arc<dyn AuthProvider>, team_id: TeamId) -> Self {
        Self {
            provider,
            team_id,
            current: Mutex::new(None),
        }
    }

    /// The established session, if any (cached copy, no network).
    pub fn current(&self) -> Option<Session> {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn store(&self, session: Option<Session>) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = session;
    }

    /// Sign in with email/password.
    ///
    /// Any pre-existing provider session is deleted first, then the MFA
    /// branches are evaluated before roles are resolved. A sign-in that
    /// resolves to zero roles is rolled back and fails.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignIn, SessionError> {
        if let Ok(Some(_)) = self.provider.current_session().await {
            if let Err(err) = self.provider.delete_current_session().await {
                debug!(%err, "could not delete pre-existing session");
            }
            self.store(None);
        }

        let provider_session = self.provider.create_email_session(email, password).await?;

        match self.provider.current_account().await {
            Err(ProviderError::MoreFactorsRequired) => Ok(SignIn::MfaRequired {
                session: provider_session,
            }),
            Err(err) => Err(err.into()),
            Ok(account) => {
                if account.prefs.mfa_required && !account.prefs.mfa_enabled {
                    return Ok(SignIn::MfaSetupRequired {
                        session: provider_session,
                    });
                }
                self.finish_sign_in(provider_session).await
            }
        }
    }

    /// Verify an MFA code and finish establishing the session.
    pub async fn complete_mfa_challenge(
        &self,
        challenge_id: &str,
        code: &str,
    ) -> Result<SignIn, SessionError> {
        self.provider.complete_mfa_challenge(challenge_id, code).await?;

        let account = self.provider.current_account().await?;
        let provider_session = match self.provider.current_session().await? {
            Some(session) => session,
            // The provider aliases the live session as "current" when it does
            // not hand back the concrete id after an MFA verification.
            None => ProviderSession {
                id: SessionId::new("current"),
                user_id: account.id.clone(),
            },
        };

        self.finish_sign_in(provider_session).await
    }

    pub async fn create_mfa_challenge(
        &self,
        factor: MfaFactor,
    ) -> Result<MfaChallenge, SessionError> {
        Ok(self.provider.create_mfa_challenge(factor).await?)
    }

    /// Enroll the account in MFA; returns the one-time recovery codes.
    pub async fn enable_mfa(&self) -> Result<Vec<String>, SessionError> {
        let account = self.provider.current_account().await?;
        self.provider.set_mfa_enabled(true).await?;
        let codes = self.provider.create_recovery_codes().await?;
        self.provider
            .update_prefs(AccountPrefs {
                mfa_enabled: true,
                ..account.prefs
            })
            .await?;
        Ok(codes)
    }

    pub async fn update_password(
        &self,
        new_password: &str,
        old_password: &str,
    ) -> Result<(), SessionError> {
        Ok(self.provider.update_password(new_password, old_password).await?)
    }

    pub async fn request_password_recovery(
        &self,
        email: &str,
        redirect_url: &str,
    ) -> Result<(), SessionError> {
        Ok(self.provider.send_password_recovery(email, redirect_url).await?)
    }

    /// Destroy the session. The local copy is cleared before the remote
    /// delete so a provider failure can never leave a signed-out user with a
    /// live local identity.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        self.store(None);
        self.provider.delete_current_session().await?;
        Ok(())
    }

    async fn finish_sign_in(
        &self,
        provider_session: ProviderSession,
    ) -> Result<SignIn, SessionError> {
        let roles = self.resolve_roles(&provider_session.user_id).await?;

        if roles.is_empty() {
            if let Err(err) = self.provider.delete_session(&provider_session.id).await {
                warn!(%err, "failed to tear down zero-role session");
            }
            return Err(SessionError::NoRolesAssigned);
        }

        let session = Session::new(
            provider_session.id,
            Identity::new(provider_session.user_id, roles),
            Utc::now(),
        );
        info!(user_id = %session.identity.user_id, "session established");
        self.store(Some(session.clone()));
        Ok(SignIn::Complete(session))
    }

    /// Resolve roles by paging the dashboard team's memberships.
    ///
    /// Pages of [`MEMBERSHIP_PAGE_LIMIT`]; a short page terminates the loop.
    /// A user absent from the team resolves to the empty set, which the
    /// caller turns into a failed sign-in.
    async fn resolve_roles(&self, user_id: &UserId) -> Result<RoleSet, SessionError> {
        let mut memberships = Vec::new();
        let mut offset = 0u64;

        loop {
            let page = self
                .provider
                .list_team_memberships(&self.team_id, MEMBERSHIP_PAGE_LIMIT, offset)
                .await?;
            let fetched = page.memberships.len() as u64;
            memberships.extend(page.memberships);
            if fetched < MEMBERSHIP_PAGE_LIMIT {
                break;
            }
            offset += MEMBERSHIP_PAGE_LIMIT;
        }

        match memberships.iter().find(|m| &m.user_id == user_id) {
            Some(membership) => Ok(RoleSet::parse_lossy(&membership.roles)),
            None => {
                warn!(%user_id, team_id = %self.team_id, "user is not a member of the dashboard team");
                Ok(RoleSet::new())
            }
        }
    }
}

#[async_trait]
impl IdentitySource for SessionManager {
    /// Validate the session, resolving roles on a cache miss.
    ///
    /// Provider rejections (no session, factors pending, invalid) map to
    /// `Ok(None)`; only transport failure surfaces as `Err`, and the guard
    /// treats that identically to "no session".
    async fn current_identity(&self) -> Result<Option<Identity>, SessionError> {
        if let Some(session) = self.current() {
            return Ok(Some(session.identity));
        }

        let account = match self.provider.current_account().await {
            Ok(account) => account,
            Err(ProviderError::Transport(msg)) => {
                return Err(ProviderError::Transport(msg).into());
            }
            Err(err) => {
                debug!(%err, "no valid session");
                return Ok(None);
            }
        };

        let roles = self.resolve_roles(&account.id).await?;
        let session_id = match self.provider.current_session().await? {
            Some(session) => session.id,
            None => SessionId::new("current"),
        };

        let session = Session::new(session_id, Identity::new(account.id, roles), Utc::now());
        self.store(Some(session.clone()));
        Ok(Some(session.identity))
    }
}
