//! The backoffice navigation tree.

use serde::{Deserialize, Serialize};

use backoffice_auth::Role;
use backoffice_core::route::paths;
use backoffice_core::RoutePath;

/// One entry of the navigation tree.
///
/// Mirrors the route table's authorization shape and adds presentation
/// data. Header entries carry no requirement and are always shown; group
/// entries have children and live or die with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub id: Option<String>,
    pub label: String,
    pub icon: Option<String>,
    pub link: Option<RoutePath>,
    pub required_roles: Vec<Role>,
    pub children: Vec<MenuEntry>,
    pub is_header: bool,
}

impl MenuEntry {
    /// A section header / separator.
    pub fn header(label: impl Into<String>) -> Self {
        Self {
            id: None,
            label: label.into(),
            icon: None,
            link: None,
            required_roles: Vec::new(),
            children: Vec::new(),
            is_header: true,
        }
    }

    /// A leaf link.
    pub fn item(
        id: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
        link: impl Into<RoutePath>,
        required_roles: &[Role],
    ) -> Self {
        Self {
            id: Some(id.into()),
            label: label.into(),
            icon: Some(icon.into()),
            link: Some(link.into()),
            required_roles: required_roles.to_vec(),
            children: Vec::new(),
            is_header: false,
        }
    }

    /// A grouping entry whose visibility is decided by its children.
    pub fn group(
        id: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
        children: Vec<MenuEntry>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            label: label.into(),
            icon: Some(icon.into()),
            link: None,
            required_roles: Vec::new(),
            children,
            is_header: false,
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

/// The full navigation tree, before role filtering.
///
/// Role sets here intentionally match the route table entry for each link.
pub fn main_menu() -> Vec<MenuEntry> {
    vec![
        MenuEntry::header("Menu"),
        MenuEntry::item(
            "dashboard",
            "Dashboard",
            "ri-dashboard-line",
            paths::DASHBOARD,
            &[Role::Admin, Role::OperationsTeam1, Role::CustomerRelations],
        ),
        MenuEntry::group(
            "catalog",
            "Catalog",
            "ri-store-line",
            vec![
                MenuEntry::item(
                    "products",
                    "Products",
                    "ri-product-hunt-line",
                    paths::PRODUCTS,
                    OPERATIONS,
                ),
                MenuEntry::item(
                    "create-product",
                    "Create Product",
                    "ri-add-circle-line",
                    "/products/new",
                    OPERATIONS,
                ),
                MenuEntry::item(
                    "categories",
                    "Categories",
                    "ri-stack-line",
                    "/categories",
                    OPERATIONS,
                ),
                MenuEntry::item(
                    "create-category",
                    "Create Category",
                    "ri-add-circle-line",
                    "/categories/new",
                    OPERATIONS,
                ),
            ],
        ),
        MenuEntry::item(
            "orders",
            "Orders",
            "ri-file-list-line",
            paths::ORDERS,
            ORDER_HANDLING,
        ),
        MenuEntry::item(
            "wholesale-requests",
            "Wholesale Requests",
            "ri-file-list-line",
            "/wholesale-requests",
            ORDER_HANDLING,
        ),
        MenuEntry::item(
            "contact-list",
            "Contact List",
            "ri-phone-line",
            paths::CONTACTS,
            ORDER_HANDLING,
        ),
        MenuEntry::item(
            "subscribers-list",
            "Subscribers List",
            "ri-user-follow-line",
            "/subscribers",
            CONTENT,
        ),
        MenuEntry::item(
            "vouchers",
            "Vouchers",
            "ri-coupon-line",
            "/vouchers",
            &[Role::Admin],
        ),
        MenuEntry::group(
            "content",
            "Site Content",
            "ri-pages-line",
            vec![
                MenuEntry::item("blog-list", "Blog List", "ri-pencil-line", paths::POSTS, CONTENT),
                MenuEntry::item(
                    "banner-list",
                    "Banner List",
                    "ri-pencil-line",
                    "/banners",
                    CONTENT,
                ),
                MenuEntry::item(
                    "testimonial-list",
                    "Testimonial List",
                    "ri-chat-quote-line",
                    "/testimonials",
                    CONTENT,
                ),
                MenuEntry::item(
                    "hero-section",
                    "Hero Section",
                    "ri-star-line",
                    "/hero-sections",
                    CONTENT,
                ),
                MenuEntry::item(
                    "general-images",
                    "General Images",
                    "ri-image-line",
                    "/general-images",
                    &[Role::Admin],
                ),
            ],
        ),
        MenuEntry::item(
            "user-management",
            "User Management",
            "ri-user-settings-line",
            "/admin/users",
            &[Role::Admin],
        ),
        MenuEntry::item(
            "change-password",
            "Change Password",
            "ri-lock-password-line",
            "/change-password",
            ALL_ROLES,
        ),
    ]
}
