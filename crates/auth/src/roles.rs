//! The closed role set used for backoffice authorization.
//!
//! Roles are granted externally (team memberships at the auth provider) and
//! arrive as raw strings with no casing guarantee. They are converted to this
//! enum at the boundary; everything past the boundary compares enum values,
//! which is what makes authorization checks case-proof.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// A backoffice role. Canonical form is the lower-case snake string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "marketing")]
    Marketing,
    #[serde(rename = "customer_relations")]
    CustomerRelations,
    #[serde(rename = "operations_team_1")]
    OperationsTeam1,
    #[serde(rename = "operations_team_2")]
    OperationsTeam2,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Marketing,
        Role::CustomerRelations,
        Role::OperationsTeam1,
        Role::OperationsTeam2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Marketing => "marketing",
            Role::CustomerRelations => "customer_relations",
            Role::OperationsTeam1 => "operations_team_1",
            Role::OperationsTeam2 => "operations_team_2",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role string that is not part of the closed set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Case-insensitive: `"Admin"`, `"ADMIN"` and `"admin"` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Role::Admin),
            "marketing" => Ok(Role::Marketing),
            "customer_relations" => Ok(Role::CustomerRelations),
            "operations_team_1" => Ok(Role::OperationsTeam1),
            "operations_team_2" => Ok(Role::OperationsTeam2),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// The set of roles held by an identity.
///
/// Backed by an ordered set so iteration order is stable regardless of the
/// order the provider returned the role strings in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw provider role strings, dropping unrecognized ones.
    ///
    /// Dropped strings are logged; they must never widen access, and the
    /// original frontend ignored them the same way (an unknown role matched
    /// no route table entry).
    pub fn parse_lossy<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roles = BTreeSet::new();
        for s in raw {
            match s.as_ref().parse::<Role>() {
                Ok(role) => {
                    roles.insert(role);
                }
                Err(UnknownRole(unknown)) => {
                    warn!(role = %unknown, "dropping unrecognized role string");
                }
            }
        }
        Self(roles)
    }

    /// Parse raw provider role strings, failing on the first unknown one.
    pub fn parse_strict<I, S>(raw: I) -> Result<Self, UnknownRole>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roles = BTreeSet::new();
        for s in raw {
            roles.insert(s.as_ref().parse::<Role>()?);
        }
        Ok(Self(roles))
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<&[Role]> for RoleSet {
    fn from(roles: &[Role]) -> Self {
        roles.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("OPERATIONS_TEAM_1".parse::<Role>().unwrap(), Role::OperationsTeam1);
        assert_eq!(" marketing ".parse::<Role>().unwrap(), Role::Marketing);
    }

    #[test]
    fn parse_rejects_unknown_roles() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert_eq!(err, UnknownRole("superuser".to_string()));
    }

    #[test]
    fn parse_lossy_drops_unknown_and_normalizes_case() {
        let set = RoleSet::parse_lossy(["Admin", "intern", "customer_relations"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Role::Admin));
        assert!(set.contains(Role::CustomerRelations));
    }

    #[test]
    fn parse_strict_fails_on_unknown() {
        let err = RoleSet::parse_strict(["admin", "intern"]).unwrap_err();
        assert_eq!(err.0, "intern");
    }

    #[test]
    fn role_set_deduplicates() {
        let set = RoleSet::parse_lossy(["admin", "Admin", "ADMIN"]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn canonical_form_round_trips() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }
}
