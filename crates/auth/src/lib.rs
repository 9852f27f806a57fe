//! `backoffice-auth` — pure authorization boundary for the backoffice.
//!
//! This crate is intentionally decoupled from transport and storage: it owns
//! the closed role set, the identity model, and the policy decisions that
//! both the route guard and the menu filter consume. No IO happens here.

pub mod identity;
pub mod policy;
pub mod roles;

pub use identity::Identity;
pub use policy::{default_route_for, is_authorized, DEFAULT_ROUTE_CASCADE};
pub use roles::{Role, RoleSet, UnknownRole};
