//! The auth-provider port.
//!
//! Mirrors the surface the backoffice actually uses from the backing
//! account service: email/password sessions, the current-account probe, MFA
//! challenges, password maintenance, and team-membership listing (which is
//! where role assignment lives). Construction of concrete clients is
//! intentionally outside this crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use backoffice_core::{SessionId, TeamId, UserId};

/// A session as issued by the provider (not yet role-resolved).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSession {
    pub id: SessionId,
    pub user_id: UserId,
}

/// Account preferences relevant to the MFA setup flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPrefs {
    #[serde(default)]
    pub mfa_required: bool,
    #[serde(default)]
    pub mfa_enabled: bool,
}

/// The provider's view of the signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: UserId,
    pub email: String,
    pub prefs: AccountPrefs,
}

/// Second factors the provider can challenge with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MfaFactor {
    Email,
    Phone,
    Totp,
    RecoveryCode,
}

/// An issued MFA challenge awaiting its code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfaChallenge {
    pub id: String,
    pub factor: MfaFactor,
}

/// One user's membership in a team, with its raw role strings.
///
/// Role strings are kept raw here; normalization into the closed role set
/// happens in the session manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMembership {
    pub user_id: UserId,
    pub roles: Vec<String>,
}

/// A page of team memberships (limit/offset pagination).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipPage {
    pub memberships: Vec<TeamMembership>,
    pub total: u64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account requires a second factor before it can be read.
    #[error("additional authentication factors required")]
    MoreFactorsRequired,

    #[error("no active session")]
    NoSession,

    #[error("not found")]
    NotFound,

    /// Transport-level failure (network, 5xx, decode).
    #[error("provider transport failure: {0}")]
    Transport(String),
}

/// Async port over the backing account/teams service.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError>;

    /// The provider-side session currently attached to this client, if any.
    async fn current_session(&self) -> Result<Option<ProviderSession>, ProviderError>;

    async fn delete_session(&self, id: &SessionId) -> Result<(), ProviderError>;

    async fn delete_current_session(&self) -> Result<(), ProviderError>;

    /// Fetch the signed-in account. Fails with [`ProviderError::MoreFactorsRequired`]
    /// when the session still needs a second factor.
    async fn current_account(&self) -> Result<Account, ProviderError>;

    async fn create_mfa_challenge(&self, factor: MfaFactor)
        -> Result<MfaChallenge, ProviderError>;

    async fn complete_mfa_challenge(
        &self,
        challenge_id: &str,
        code: &str,
    ) -> Result<(), ProviderError>;

    async fn set_mfa_enabled(&self, enabled: bool) -> Result<(), ProviderError>;

    async fn create_recovery_codes(&self) -> Result<Vec<String>, ProviderError>;

    async fn update_prefs(&self, prefs: AccountPrefs) -> Result<(), ProviderError>;

    async fn update_password(
        &self,
        new_password: &str,
        old_password: &str,
    ) -> Result<(), ProviderError>;

    async fn send_password_recovery(
        &self,
        email: &str,
        redirect_url: &str,
    ) -> Result<(), ProviderError>;

    async fn list_team_memberships(
        &self,
        team_id: &TeamId,
        limit: u64,
        offset: u64,
    ) -> Result<MembershipPage, ProviderError>;
}
