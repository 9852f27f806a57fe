//! The authenticated principal of a backoffice session.

use serde::{Deserialize, Serialize};

use backoffice_core::UserId;

use crate::RoleSet;

/// An authenticated identity: a provider user id plus its resolved roles.
///
/// Created on successful sign-in, held for the session's lifetime, destroyed
/// on sign-out. An identity with zero roles is authenticated in the provider
/// sense but is treated as unauthenticated for authorization purposes; the
/// sign-in flow refuses to produce one, but the type does not assume that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub roles: RoleSet,
}

impl Identity {
    pub fn new(user_id: UserId, roles: RoleSet) -> Self {
        Self { user_id, roles }
    }

    /// Whether this identity can pass any authorization check at all.
    pub fn has_roles(&self) -> bool {
        !self.roles.is_empty()
    }
}
