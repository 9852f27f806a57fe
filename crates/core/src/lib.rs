//! `backoffice-core` — shared primitives for the backoffice access layer.
//!
//! This crate contains **pure domain** building blocks (no IO, no provider
//! SDK types): opaque identifiers, route paths, and the shared error model.

pub mod error;
pub mod id;
pub mod route;

pub use error::{DomainError, DomainResult};
pub use id::{FileId, ProductId, SessionId, TeamId, UserId};
pub use route::RoutePath;
