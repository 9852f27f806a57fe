//! The session value held for a signed-in backoffice user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use backoffice_auth::Identity;
use backoffice_core::SessionId;

/// A fully established session: provider session id + role-resolved identity.
///
/// Only the sign-in/sign-out flow creates or destroys these; guard and menu
/// code reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub identity: Identity,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: SessionId, identity: Identity, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            identity,
            created_at,
        }
    }
}
