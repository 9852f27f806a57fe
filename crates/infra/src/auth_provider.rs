//! In-memory auth provider adapter.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use backoffice_core::{SessionId, TeamId, UserId};
use backoffice_session::{
    Account, AccountPrefs, AuthProvider, MembershipPage, MfaChallenge, MfaFactor, ProviderError,
    ProviderSession, TeamMembership,
};

struct RegisteredAccount {
    email: String,
    password: String,
    account: Account,
    /// Whether the provider demands a second factor after password auth.
    mfa_enforced: bool,
}

#[derive(Default)]
struct ProviderState {
    accounts: Vec<RegisteredAccount>,
    session: Option<ProviderSession>,
    mfa_pending: bool,
    /// challenge id → expected code
    challenges: HashMap<String, String>,
    memberships: HashMap<TeamId, Vec<TeamMembership>>,
    recovery_requests: Vec<(String, String)>,
}

/// Auth provider held in memory, with the same observable flow as the real
/// service: password session → optional factor gate → account reads.
#[derive(Default)]
pub struct InMemoryAuthProvider {
    state: Mutex<ProviderState>,
}

impl InMemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_account(&self, email: &str, password: &str, user_id: UserId) {
        self.register_account_with(email, password, user_id, AccountPrefs::default(), false);
    }

    pub fn register_account_with(
        &self,
        email: &str,
        password: &str,
        user_id: UserId,
        prefs: AccountPrefs,
        mfa_enforced: bool,
    ) {
        self.lock().accounts.push(RegisteredAccount {
            email: email.to_string(),
            password: password.to_string(),
            account: Account {
                id: user_id,
                email: email.to_string(),
                prefs,
            },
            mfa_enforced,
        });
    }

    pub fn add_membership(&self, team: &TeamId, user_id: UserId, roles: &[&str]) {
        self.lock()
            .memberships
            .entry(team.clone())
            .or_default()
            .push(TeamMembership {
                user_id,
                roles: roles.iter().map(|r| r.to_string()).collect(),
            });
    }

    /// Test hook: the code the provider expects for an issued challenge.
    pub fn issued_code(&self, challenge_id: &str) -> Option<String> {
        self.lock().challenges.get(challenge_id).cloned()
    }

    /// Test hook: recovery emails "sent" so far, as (email, redirect URL).
    pub fn recovery_requests(&self) -> Vec<(String, String)> {
        self.lock().recovery_requests.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ProviderState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn mint_id() -> String {
        Uuid::now_v7().simple().to_string()
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        let mut state = self.lock();
        let registered = state
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email) && a.password == password)
            .ok_or(ProviderError::InvalidCredentials)?;

        let session = ProviderSession {
            id: SessionId::new(Self::mint_id()),
            user_id: registered.account.id.clone(),
        };
        let gate = registered.mfa_enforced;
        state.session = Some(session.clone());
        state.mfa_pending = gate;
        Ok(session)
    }

    async fn current_session(&self) -> Result<Option<ProviderSession>, ProviderError> {
        Ok(self.lock().session.clone())
    }

    async fn delete_session(&self, id: &SessionId) -> Result<(), ProviderError> {
        let mut state = self.lock();
        if !state.session.as_ref().is_some_and(|s| &s.id == id) {
            return Err(ProviderError::NotFound);
        }
        state.session = None;
        state.mfa_pending = false;
        Ok(())
    }

    async fn delete_current_session(&self) -> Result<(), ProviderError> {
        let mut state = self.lock();
        if state.session.take().is_none() {
            return Err(ProviderError::NoSession);
        }
        state.mfa_pending = false;
        Ok(())
    }

    async fn current_account(&self) -> Result<Account, ProviderError> {
        let state = self.lock();
        let session = state.session.as_ref().ok_or(ProviderError::NoSession)?;
        if state.mfa_pending {
            return Err(ProviderError::MoreFactorsRequired);
        }
        state
            .accounts
            .iter()
            .find(|a| a.account.id == session.user_id)
            .map(|a| a.account.clone())
            .ok_or(ProviderError::NotFound)
    }

    async fn create_mfa_challenge(
        &self,
        factor: MfaFactor,
    ) -> Result<MfaChallenge, ProviderError> {
        let mut state = self.lock();
        if state.session.is_none() {
            return Err(ProviderError::NoSession);
        }
        let id = Self::mint_id();
        let code = Self::mint_id()[..6].to_string();
        state.challenges.insert(id.clone(), code);
        Ok(MfaChallenge { id, factor })
    }

    async fn complete_mfa_challenge(
        &self,
        challenge_id: &str,
        code: &str,
    ) -> Result<(), ProviderError> {
        let mut state = self.lock();
        match state.challenges.get(challenge_id) {
            Some(expected) if expected == code => {
                state.challenges.remove(challenge_id);
                state.mfa_pending = false;
                Ok(())
            }
            Some(_) => Err(ProviderError::InvalidCredentials),
            None => Err(ProviderError::NotFound),
        }
    }

    async fn set_mfa_enabled(&self, enabled: bool) -> Result<(), ProviderError> {
        let mut state = self.lock();
        let user_id = state
            .session
            .as_ref()
            .map(|s| s.user_id.clone())
            .ok_or(ProviderError::NoSession)?;
        let registered = state
            .accounts
            .iter_mut()
            .find(|a| a.account.id == user_id)
            .ok_or(ProviderError::NotFound)?;
        registered.mfa_enforced = enabled;
        Ok(())
    }

    async fn create_recovery_codes(&self) -> Result<Vec<String>, ProviderError> {
        if self.lock().session.is_none() {
            return Err(ProviderError::NoSession);
        }
        Ok((0..6).map(|_| Self::mint_id()[..10].to_string()).collect())
    }

    async fn update_prefs(&self, prefs: AccountPrefs) -> Result<(), ProviderError> {
        let mut state = self.lock();
        let user_id = state
            .session
            .as_ref()
            .map(|s| s.user_id.clone())
            .ok_or(ProviderError::NoSession)?;
        let registered = state
            .accounts
            .iter_mut()
            .find(|a| a.account.id == user_id)
            .ok_or(ProviderError::NotFound)?;
        registered.account.prefs = prefs;
        Ok(())
    }

    async fn update_password(
        &self,
        new_password: &str,
        old_password: &str,
    ) -> Result<(), ProviderError> {
        let mut state = self.lock();
        let user_id = state
            .session
            .as_ref()
            .map(|s| s.user_id.clone())
            .ok_or(ProviderError::NoSession)?;
        let registered = state
            .accounts
            .iter_mut()
            .find(|a| a.account.id == user_id)
            .ok_or(ProviderError::NotFound)?;
        if registered.password != old_password {
            return Err(ProviderError::InvalidCredentials);
        }
        registered.password = new_password.to_string();
        Ok(())
    }

    async fn send_password_recovery(
        &self,
        email: &str,
        redirect_url: &str,
    ) -> Result<(), ProviderError> {
        self.lock()
            .recovery_requests
            .push((email.to_string(), redirect_url.to_string()));
        Ok(())
    }

    async fn list_team_memberships(
        &self,
        team_id: &TeamId,
        limit: u64,
        offset: u64,
    ) -> Result<MembershipPage, ProviderError> {
        let state = self.lock();
        let all = state.memberships.get(team_id).cloned().unwrap_or_default();
        let total = all.len() as u64;
        let memberships = all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok(MembershipPage { memberships, total })
    }
}
