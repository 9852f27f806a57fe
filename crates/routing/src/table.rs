//! The declarative route tables.
//!
//! One table, consumed by both the router and (via matching role sets in
//! `backoffice-nav`) the menu, so the two cannot drift apart. Defined at
//! build time and never mutated.

use backoffice_auth::Role;
use backoffice_core::route::paths;

use crate::pattern::RoutePattern;

/// A protected route: its path pattern plus the roles allowed to view it.
///
/// An empty `required_roles` slice means "any authenticated user".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub pattern: RoutePattern,
    pub required_roles: &'static [Role],
}

impl RouteDescriptor {
    pub const fn new(pattern: &'static str, required_roles: &'static [Role]) -> Self {
        Self {
            pattern: RoutePattern::new(pattern),
            required_roles,
        }
    }
}

const ALL_ROLES: &[Role] = &[
    Role::Admin,
    Role::Marketing,
    Role::CustomerRelations,
    Role::OperationsTeam1,
    Role::OperationsTeam2,
];

const OPERATIONS: &[Role] = &[Role::Admin, Role::OperationsTeam1, Role::OperationsTeam2];

const ORDER_HANDLING: &[Role] = &[
    Role::Admin,
    Role::CustomerRelations,
    Role::OperationsTeam1,
    Role::OperationsTeam2,
];

const CONTENT: &[Role] = &[Role::Admin, Role::Marketing];

const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Every protected route of the backoffice.
pub const PROTECTED_ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor::new(
        paths::DASHBOARD,
        &[Role::Admin, Role::OperationsTeam1, Role::CustomerRelations],
    ),
    RouteDescriptor::new(paths::NOTIFICATIONS, ALL_ROLES),
    // Catalog management
    RouteDescriptor::new(paths::PRODUCTS, OPERATIONS),
    RouteDescriptor::new("/products/new", OPERATIONS),
    RouteDescriptor::new("/products/:id", OPERATIONS),
    RouteDescriptor::new("/products/:id/edit", OPERATIONS),
    RouteDescriptor::new("/categories", OPERATIONS),
    RouteDescriptor::new("/categories/new", OPERATIONS),
    RouteDescriptor::new("/categories/:id/edit", OPERATIONS),
    // Order handling
    RouteDescriptor::new(paths::ORDERS, ORDER_HANDLING),
    RouteDescriptor::new("/orders/:id", ORDER_HANDLING),
    RouteDescriptor::new("/invoices/:order_id", ORDER_HANDLING),
    RouteDescriptor::new("/wholesale-requests", ORDER_HANDLING),
    RouteDescriptor::new(paths::CONTACTS, ORDER_HANDLING),
    // Content management
    RouteDescriptor::new(paths::POSTS, CONTENT),
    RouteDescriptor::new("/posts/new", CONTENT),
    RouteDescriptor::new("/posts/:id/edit", CONTENT),
    RouteDescriptor::new("/banners", CONTENT),
    RouteDescriptor::new("/banners/new", CONTENT),
    RouteDescriptor::new("/banners/:id/edit", CONTENT),
    RouteDescriptor::new("/testimonials", CONTENT),
    RouteDescriptor::new("/testimonials/new", CONTENT),
    RouteDescriptor::new("/testimonials/:id/edit", CONTENT),
    RouteDescriptor::new("/hero-sections", CONTENT),
    RouteDescriptor::new("/hero-sections/new", CONTENT),
    RouteDescriptor::new("/hero-sections/:id/edit", CONTENT),
    RouteDescriptor::new("/subscribers", CONTENT),
    // Admin-only surfaces
    RouteDescriptor::new("/vouchers", ADMIN_ONLY),
    RouteDescriptor::new("/general-images", ADMIN_ONLY),
    RouteDescriptor::new("/general-images/:id/edit", ADMIN_ONLY),
    RouteDescriptor::new("/admin/users", ADMIN_ONLY),
    // Available to everyone signed in
    RouteDescriptor::new("/change-password", ALL_ROLES),
];

/// Paths reachable without a session (plus the not-authorized landing page,
/// which must stay reachable or the guard's redirect would loop).
pub const PUBLIC_ROUTES: &[&str] = &[
    paths::SIGN_IN,
    "/sign-out",
    "/setup-mfa",
    "/reset-password",
    paths::NOT_AUTHORIZED,
    "/maintenance",
    "/offline",
];

/// Look up the protected route matching a concrete path.
pub fn find_route(path: &str) -> Option<&'static RouteDescriptor> {
    PROTECTED_ROUTES.iter().find(|route| route.pattern.matches(path))
}

pub fn is_public(path: &str) -> bool {
    PUBLIC_ROUTES
        .iter()
        .any(|&public| RoutePattern::new(public).matches(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameterized_routes_resolve() {
        let route = find_route("/products/6723ab/edit").unwrap();
        assert_eq!(route.pattern.as_str(), "/products/:id/edit");
        assert_eq!(route.required_roles, OPERATIONS);
    }

    #[test]
    fn unknown_paths_resolve_to_nothing() {
        assert!(find_route("/warehouse").is_none());
    }

    #[test]
    fn public_paths_are_not_protected() {
        for &public in PUBLIC_ROUTES {
            assert!(is_public(public));
            assert!(find_route(public).is_none(), "{public} is in both tables");
        }
    }

    #[test]
    fn vouchers_are_admin_only() {
        let route = find_route("/vouchers").unwrap();
        assert_eq!(route.required_roles, ADMIN_ONLY);
    }

    #[test]
    fn every_role_can_reach_its_default_landing_route() {
        use backoffice_auth::{default_route_for, is_authorized, Role, RoleSet};
        use backoffice_core::route::paths;

        for role in Role::ALL {
            let roles: RoleSet = [role].into_iter().collect();
            let landing = default_route_for(&roles);
            assert_ne!(landing.as_str(), paths::NOT_AUTHORIZED);
            let route = find_route(landing.as_str()).unwrap();
            assert!(
                is_authorized(&roles, route.required_roles),
                "{role} cannot view its own landing route {landing}"
            );
        }
    }
}
