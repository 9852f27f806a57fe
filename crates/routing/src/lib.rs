//! `backoffice-routing` — the declarative route table and the route guard.
//!
//! The table is static data defined at build time; the guard is the one
//! component allowed to suspend (session validation can hit the network).
//! Authorization decisions delegate to `backoffice_auth::is_authorized`, the
//! same function the menu filter uses.

pub mod guard;
pub mod pattern;
pub mod table;

pub use guard::{GuardDecision, GuardOutcome, GuardState, Navigation, RouteGuard};
pub use pattern::RoutePattern;
pub use table::{find_route, is_public, RouteDescriptor, PROTECTED_ROUTES, PUBLIC_ROUTES};
