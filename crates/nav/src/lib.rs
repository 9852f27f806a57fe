//! `backoffice-nav` — the navigation menu and its role filter.
//!
//! The menu is a declarative tree; filtering delegates to the same
//! `is_authorized` the route guard uses, which is the whole point: a link
//! the guard would bounce must never be visible.

pub mod filter;
pub mod menu;

pub use filter::filter_menu;
pub use menu::{main_menu, MenuEntry};
