//! Role-based menu filtering.

use backoffice_auth::{is_authorized, RoleSet};

use crate::menu::MenuEntry;

/// Filter a menu tree down to what `user_roles` may see.
///
/// Stable: surviving entries keep their relative order. Recursive: a group
/// entry survives iff at least one child survives; headers always survive;
/// leaves survive iff the role policy admits them. Uses the exact policy
/// function the route guard uses.
pub fn filter_menu(entries: &[MenuEntry], user_roles: &RoleSet) -> Vec<MenuEntry> {
    entries
        .iter()
        .filter_map(|entry| filter_entry(entry, user_roles))
        .collect()
}

fn filter_entry(entry: &MenuEntry, user_roles: &RoleSet) -> Option<MenuEntry> {
    if entry.is_header {
        return Some(entry.clone());
    }

    if !entry.children.is_empty() {
        let children = filter_menu(&entry.children, user_roles);
        if children.is_empty() {
            return None;
        }
        let mut kept = entry.clone();
        kept.children = children;
        return Some(kept);
    }

    is_authorized(user_roles, &entry.required_roles).then(|| entry.clone())
}
