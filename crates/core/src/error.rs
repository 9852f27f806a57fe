//! Domain error model.

use thiserror::Error;

/// Result type used across the access layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error for the shared primitives.
///
/// Deliberately small: the session, routing, and catalog crates each carry
/// their own failure enums at the boundary they guard. What lives here is
/// only what the shared value types themselves can reject.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. empty provider id).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
