//! `backoffice-session` — the session store of the backoffice.
//!
//! Owns the [`Session`] lifecycle (created on sign-in, destroyed on
//! sign-out) and the sign-in cascade: provider authentication, the MFA
//! branches, and role resolution from team memberships. The auth provider
//! itself is a port ([`AuthProvider`]); adapters live in `backoffice-infra`
//! or the embedding application.

pub mod manager;
pub mod provider;
pub mod session;

pub use manager::{IdentitySource, SessionError, SessionManager, SignIn};
pub use provider::{
    Account, AccountPrefs, AuthProvider, MembershipPage, MfaChallenge, MfaFactor, ProviderError,
    ProviderSession, TeamMembership,
};
pub use session::Session;
