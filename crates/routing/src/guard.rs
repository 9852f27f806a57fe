//! The route guard: per-navigation authorization state machine.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use backoffice_auth::is_authorized;
use backoffice_session::IdentitySource;

use crate::table::RouteDescriptor;

/// What the embedding UI should do once a navigation has been decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the protected view.
    Render,
    /// No valid session: redirect to sign-in.
    RedirectToSignIn,
    /// Valid session, insufficient roles: redirect to not-authorized.
    RedirectToNotAuthorized,
}

/// Guard state for the navigation currently in flight.
///
/// `Checking` is the only state in which nothing is rendered; protected
/// content appears strictly after `Resolved(Render)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Resolved(GuardOutcome),
}

/// Handle for one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    epoch: u64,
}

/// A decision computed for a specific navigation epoch.
///
/// Decisions are only applied if their navigation is still the latest one;
/// a late-arriving decision for an abandoned navigation is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardDecision {
    pub outcome: GuardOutcome,
    epoch: u64,
}

/// Wraps protected views: consults the session store and the role policy,
/// resolving every navigation to render-or-redirect.
///
/// Identity is read once per navigation decision; a session change after a
/// decision has been applied does not retroactively revoke it (the next
/// navigation re-checks).
pub struct RouteGuard {
    source: Arc<dyn IdentitySource>,
    epoch: AtomicU64,
    state: Mutex<GuardState>,
}

impl RouteGuard {
    pub fn new(source: Arc<dyn IdentitySource>) -> Self {
        Self {
            source,
            epoch: AtomicU64::new(0),
            state: Mutex::new(GuardState::Checking),
        }
    }

    pub fn state(&self) -> GuardState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Enter the Checking state for a new navigation, invalidating any
    /// decision still in flight for the previous one.
    pub fn begin_navigation(&self) -> Navigation {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = GuardState::Checking;
        Navigation { epoch }
    }

    /// Compute the decision for `route` under `navigation`.
    ///
    /// Fails closed: a session-check error is indistinguishable from "no
    /// valid session".
    pub async fn evaluate(
        &self,
        navigation: Navigation,
        route: &RouteDescriptor,
    ) -> GuardDecision {
        let identity = match self.source.current_identity().await {
            Ok(identity) => identity,
            Err(err) => {
                warn!(%err, pattern = %route.pattern, "session check failed; treating as unauthenticated");
                None
            }
        };

        let outcome = match identity {
            None => GuardOutcome::RedirectToSignIn,
            Some(identity) => {
                if is_authorized(&identity.roles, route.required_roles) {
                    GuardOutcome::Render
                } else {
                    debug!(
                        user_id = %identity.user_id,
                        pattern = %route.pattern,
                        "authorization denied"
                    );
                    GuardOutcome::RedirectToNotAuthorized
                }
            }
        };

        GuardDecision {
            outcome,
            epoch: navigation.epoch,
        }
    }

    /// Apply a decision, unless a newer navigation has started since it was
    /// computed. Returns the outcome that took effect, or `None` for a
    /// discarded stale decision.
    pub fn apply(&self, decision: GuardDecision) -> Option<GuardOutcome> {
        if decision.epoch != self.epoch.load(Ordering::SeqCst) {
            debug!("discarding stale guard decision");
            return None;
        }
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) =
            GuardState::Resolved(decision.outcome);
        Some(decision.outcome)
    }

    /// Convenience for the common path: one navigation, evaluated and
    /// applied in order.
    pub async fn check(&self, route: &RouteDescriptor) -> GuardOutcome {
        let navigation = self.begin_navigation();
        let decision = self.evaluate(navigation, route).await;
        // Cannot be stale: nothing newer has begun on this guard.
        self.apply(decision).unwrap_or(decision.outcome)
    }
}
