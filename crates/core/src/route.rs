//! Route path value type and the well-known destinations of the backoffice.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A route path inside the backoffice (e.g. `/dashboard`).
///
/// Paths are intentionally opaque at this layer; matching a concrete path
/// against the route table is the routing crate's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutePath(Cow<'static, str>);

impl RoutePath {
    pub fn new(path: impl Into<Cow<'static, str>>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for RoutePath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for RoutePath {
    fn from(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }
}

/// Destinations shared by the role-policy cascade and the route/menu tables.
///
/// Having one set of constants is what keeps the policy, the guard, and the
/// menu from drifting apart.
pub mod paths {
    pub const SIGN_IN: &str = "/sign-in";
    pub const NOT_AUTHORIZED: &str = "/not-authorized";
    pub const DASHBOARD: &str = "/dashboard";
    pub const NOTIFICATIONS: &str = "/notifications";
    pub const PRODUCTS: &str = "/products";
    pub const ORDERS: &str = "/orders";
    pub const CONTACTS: &str = "/contacts";
    pub const POSTS: &str = "/posts";
}
