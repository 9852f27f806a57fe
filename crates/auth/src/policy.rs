//! Role policy: the authorization check and the default-landing cascade.
//!
//! Both the route guard and the menu filter call [`is_authorized`]; having a
//! single decision function is what guarantees the menu never shows a link
//! the guard would bounce.
//!
//! - No IO
//! - No panics
//! - No business logic beyond set membership

use backoffice_core::route::paths;
use backoffice_core::RoutePath;

use crate::{Role, RoleSet};

/// Decide whether `user_roles` may access something requiring `required`.
///
/// An empty `required` slice means "any authenticated user": it passes for
/// every non-empty role set and fails for the empty one. Otherwise the check
/// is a plain non-empty-intersection test. Case never enters into it; raw
/// strings were normalized into [`Role`] values at the boundary.
pub fn is_authorized(user_roles: &RoleSet, required: &[Role]) -> bool {
    if required.is_empty() {
        return !user_roles.is_empty();
    }
    required.iter().any(|role| user_roles.contains(*role))
}

/// The default-landing cascade, first match wins.
///
/// The ordering is a policy decision, not an artifact of set iteration: a
/// user holding both `operations_team_2` and `marketing` lands on orders,
/// not posts. Kept public so the priority is auditable and testable on its
/// own.
pub const DEFAULT_ROUTE_CASCADE: &[(&[Role], &str)] = &[
    (&[Role::Admin, Role::OperationsTeam1], paths::DASHBOARD),
    (&[Role::OperationsTeam2], paths::ORDERS),
    (&[Role::Marketing], paths::POSTS),
    (&[Role::CustomerRelations], paths::CONTACTS),
];

/// Resolve the landing route for a freshly signed-in identity.
///
/// Total: every role set, including the empty one, maps to exactly one path.
pub fn default_route_for(user_roles: &RoleSet) -> RoutePath {
    for (roles, path) in DEFAULT_ROUTE_CASCADE {
        if roles.iter().any(|role| user_roles.contains(*role)) {
            return RoutePath::from(*path);
        }
    }
    RoutePath::from(paths::NOT_AUTHORIZED)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(list: &[Role]) -> RoleSet {
        list.iter().copied().collect()
    }

    #[test]
    fn empty_required_admits_any_authenticated_user() {
        assert!(is_authorized(&roles(&[Role::Marketing]), &[]));
        assert!(is_authorized(&roles(&[Role::Admin, Role::OperationsTeam2]), &[]));
    }

    #[test]
    fn empty_required_rejects_empty_role_set() {
        assert!(!is_authorized(&RoleSet::new(), &[]));
    }

    #[test]
    fn intersection_grants_access() {
        let user = roles(&[Role::OperationsTeam2, Role::Marketing]);
        assert!(is_authorized(&user, &[Role::Admin, Role::Marketing]));
    }

    #[test]
    fn disjoint_sets_deny_access() {
        let user = roles(&[Role::OperationsTeam2]);
        assert!(!is_authorized(&user, &[Role::Admin]));
    }

    #[test]
    fn casing_differences_at_the_boundary_do_not_matter() {
        let user = RoleSet::parse_lossy(["Admin"]);
        assert!(is_authorized(&user, &[Role::Admin]));
    }

    #[test]
    fn cascade_priority_admin_and_ops1_land_on_dashboard() {
        assert_eq!(default_route_for(&roles(&[Role::Admin])).as_str(), paths::DASHBOARD);
        assert_eq!(
            default_route_for(&roles(&[Role::OperationsTeam1])).as_str(),
            paths::DASHBOARD
        );
    }

    #[test]
    fn cascade_priority_is_fixed_not_set_order() {
        // marketing alone → posts; marketing + ops2 → orders (higher priority).
        assert_eq!(default_route_for(&roles(&[Role::Marketing])).as_str(), paths::POSTS);
        assert_eq!(
            default_route_for(&roles(&[Role::Marketing, Role::OperationsTeam2])).as_str(),
            paths::ORDERS
        );
        // admin beats everything.
        assert_eq!(
            default_route_for(&roles(&[
                Role::Admin,
                Role::Marketing,
                Role::CustomerRelations,
                Role::OperationsTeam2,
            ]))
            .as_str(),
            paths::DASHBOARD
        );
    }

    #[test]
    fn cascade_tail() {
        assert_eq!(
            default_route_for(&roles(&[Role::CustomerRelations])).as_str(),
            paths::CONTACTS
        );
        assert_eq!(default_route_for(&RoleSet::new()).as_str(), paths::NOT_AUTHORIZED);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_role() -> impl Strategy<Value = Role> {
            prop::sample::select(Role::ALL.to_vec())
        }

        fn arb_role_set() -> impl Strategy<Value = RoleSet> {
            prop::collection::btree_set(arb_role(), 0..=5).prop_map(|s| s.into_iter().collect())
        }

        proptest! {
            /// Property: authorized iff required is empty and user non-empty,
            /// or the intersection is non-empty.
            #[test]
            fn authorization_is_exactly_intersection(
                user in arb_role_set(),
                required in prop::collection::vec(arb_role(), 0..=5),
            ) {
                let expected = if required.is_empty() {
                    !user.is_empty()
                } else {
                    required.iter().any(|r| user.contains(*r))
                };
                prop_assert_eq!(is_authorized(&user, &required), expected);
            }

            /// Property: the cascade is total and lands on a known path.
            #[test]
            fn default_route_is_total(user in arb_role_set()) {
                let path = default_route_for(&user);
                let known = [
                    paths::DASHBOARD,
                    paths::ORDERS,
                    paths::POSTS,
                    paths::CONTACTS,
                    paths::NOT_AUTHORIZED,
                ];
                prop_assert!(known.contains(&path.as_str()));
            }

            /// Property: the cascade is deterministic under re-evaluation.
            #[test]
            fn default_route_is_deterministic(user in arb_role_set()) {
                prop_assert_eq!(default_route_for(&user), default_route_for(&user));
            }

            /// Property: the first cascade row whose roles intersect decides.
            #[test]
            fn first_matching_row_wins(user in arb_role_set()) {
                let expected = DEFAULT_ROUTE_CASCADE
                    .iter()
                    .find(|(row, _)| row.iter().any(|r| user.contains(*r)))
                    .map(|(_, path)| *path)
                    .unwrap_or(paths::NOT_AUTHORIZED);
                let actual = default_route_for(&user);
                prop_assert_eq!(actual.as_str(), expected);
            }
        }
    }
}
