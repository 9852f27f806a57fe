//! The notification feed: derivation, seen tracking, search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use backoffice_catalog::Product;
use backoffice_core::ProductId;

use crate::notification::Notification;

/// How many notifications the bell dropdown shows.
pub const DROPDOWN_PREVIEW_LIMIT: usize = 5;

/// Load/error state of the feed, surfaced to both UI consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedStatus {
    Loading,
    Ready,
    Failed { message: String },
}

/// Owns the derived notification list and is the only mutator of `seen`.
///
/// Regeneration is deliberately full-replace: every snapshot change rebuilds
/// the list from scratch and resets `seen`, so a product that stays under
/// threshold re-alerts. That mirrors the shipped dashboard behavior and is
/// recorded as such in DESIGN.md.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationFeed {
    notifications: Vec<Notification>,
    search_query: String,
    status: FeedStatus,
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self {
            notifications: Vec::new(),
            search_query: String::new(),
            status: FeedStatus::Loading,
        }
    }

    /// Rebuild the feed from a catalog snapshot.
    ///
    /// Exactly one notification per product currently below its threshold,
    /// in snapshot order. The prior list, including its seen flags, is
    /// discarded.
    pub fn rebuild(&mut self, products: &[Product], now: DateTime<Utc>) {
        self.notifications = products
            .iter()
            .filter(|product| product.is_low_stock())
            .map(|product| Notification::low_stock(product, now))
            .collect();
        self.status = FeedStatus::Ready;
        debug!(count = self.notifications.len(), "notification feed rebuilt");
    }

    /// Record a failed catalog fetch. The previous list is kept so the UI
    /// can keep showing it alongside the error.
    pub fn mark_failed(&mut self, message: impl Into<String>) {
        self.status = FeedStatus::Failed {
            message: message.into(),
        };
    }

    pub fn status(&self) -> &FeedStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, FeedStatus::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.status, FeedStatus::Failed { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FeedStatus::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// The consumer-visible list: case-insensitive substring match of the
    /// search query against each message. The underlying full list is
    /// untouched.
    pub fn notifications(&self) -> Vec<&Notification> {
        if self.search_query.is_empty() {
            return self.notifications.iter().collect();
        }
        let needle = self.search_query.to_lowercase();
        self.notifications
            .iter()
            .filter(|n| n.message.to_lowercase().contains(&needle))
            .collect()
    }

    /// The bell dropdown's slice: first five of the *unfiltered* list, in
    /// insertion order.
    pub fn preview(&self) -> &[Notification] {
        let end = self.notifications.len().min(DROPDOWN_PREVIEW_LIMIT);
        &self.notifications[..end]
    }

    /// Unseen badge count, always computed over the unfiltered list.
    ///
    /// Derived from the list itself rather than a separate counter, which is
    /// what makes it immune to double-marking and unknown ids.
    pub fn unseen_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.seen).count()
    }

    pub fn mark_as_seen(&mut self, id: &ProductId) {
        if let Some(notification) = self.notifications.iter_mut().find(|n| &n.id == id) {
            notification.seen = true;
        }
    }

    pub fn mark_all_as_seen(&mut self) {
        for notification in &mut self.notifications {
            notification.seen = true;
        }
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::FileId;

    fn product(id: &str, name: &str, stock: i64, alert: Option<i64>) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: 1.0,
            stock_quantity: stock,
            low_stock_alert: alert,
            is_on_sale: false,
            is_wholesale: false,
            image_ids: Vec::<FileId>::new(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn derives_one_notification_per_low_stock_product() {
        // P: 5 < 10 alerts; Q: 50 >= default 20 does not.
        let products = vec![
            product("p", "Milk", 5, Some(10)),
            product("q", "Flour", 50, None),
        ];

        let mut feed = NotificationFeed::new();
        feed.rebuild(&products, now());

        assert_eq!(feed.len(), 1);
        assert_eq!(feed.unseen_count(), 1);
        let visible = feed.notifications();
        assert_eq!(visible[0].product_id, ProductId::new("p"));
        assert_eq!(visible[0].message, "Milk has only 5 units left (Alert threshold: 10)");
    }

    #[test]
    fn empty_catalog_means_empty_feed() {
        let mut feed = NotificationFeed::new();
        feed.rebuild(&[], now());
        assert!(feed.is_empty());
        assert_eq!(feed.unseen_count(), 0);
        assert!(!feed.is_loading());
    }

    #[test]
    fn regeneration_resets_seen_state() {
        let products = vec![product("p", "Milk", 5, Some(10))];
        let mut feed = NotificationFeed::new();

        feed.rebuild(&products, now());
        feed.mark_all_as_seen();
        assert_eq!(feed.unseen_count(), 0);

        // Product still under threshold after the next snapshot: it
        // re-alerts as new.
        feed.rebuild(&products, now());
        assert_eq!(feed.unseen_count(), 1);
        assert!(!feed.notifications()[0].seen);
    }

    #[test]
    fn mark_as_seen_is_idempotent_and_ignores_unknown_ids() {
        let products = vec![
            product("p", "Milk", 5, Some(10)),
            product("r", "Bread", 2, None),
        ];
        let mut feed = NotificationFeed::new();
        feed.rebuild(&products, now());
        assert_eq!(feed.unseen_count(), 2);

        let id = ProductId::new("p");
        feed.mark_as_seen(&id);
        feed.mark_as_seen(&id);
        feed.mark_as_seen(&ProductId::new("missing"));
        assert_eq!(feed.unseen_count(), 1);

        feed.mark_as_seen(&ProductId::new("r"));
        feed.mark_as_seen(&ProductId::new("r"));
        assert_eq!(feed.unseen_count(), 0);
    }

    #[test]
    fn search_filters_messages_without_touching_the_badge() {
        let products = vec![
            product("p", "Milk", 3, None),
            product("r", "Bread", 2, None),
        ];
        let mut feed = NotificationFeed::new();
        feed.rebuild(&products, now());

        feed.set_search_query("milk");
        let visible = feed.notifications();
        assert_eq!(visible.len(), 1);
        assert!(visible[0].message.starts_with("Milk"));
        // Badge still counts the full list.
        assert_eq!(feed.unseen_count(), 2);

        feed.set_search_query("");
        assert_eq!(feed.notifications().len(), 2);
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut feed = NotificationFeed::new();
        feed.rebuild(&[product("p", "Milk", 3, None)], now());
        feed.set_search_query("MILK");
        assert_eq!(feed.notifications().len(), 1);
    }

    #[test]
    fn preview_caps_at_five_in_insertion_order() {
        let products: Vec<Product> = (0..8)
            .map(|i| product(&format!("p-{i}"), &format!("Item {i}"), 1, None))
            .collect();
        let mut feed = NotificationFeed::new();
        feed.rebuild(&products, now());

        // Search must not affect the dropdown slice.
        feed.set_search_query("Item 7");

        let preview = feed.preview();
        assert_eq!(preview.len(), DROPDOWN_PREVIEW_LIMIT);
        assert_eq!(preview[0].product_id, ProductId::new("p-0"));
        assert_eq!(preview[4].product_id, ProductId::new("p-4"));
    }

    #[test]
    fn fetch_failure_surfaces_without_discarding_the_list() {
        let mut feed = NotificationFeed::new();
        feed.rebuild(&[product("p", "Milk", 3, None)], now());

        feed.mark_failed("catalog fetch failed");
        assert!(feed.is_error());
        assert_eq!(feed.error(), Some("catalog fetch failed"));
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn ids_are_unique_within_a_regeneration() {
        let products: Vec<Product> = (0..6)
            .map(|i| product(&format!("p-{i}"), &format!("Item {i}"), 0, None))
            .collect();
        let mut feed = NotificationFeed::new();
        feed.rebuild(&products, now());

        let mut ids: Vec<&ProductId> = feed.notifications().iter().map(|n| &n.id).collect();
        ids.sort_by_key(|id| id.as_str().to_string());
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_products() -> impl Strategy<Value = Vec<Product>> {
            prop::collection::vec((0i64..100, proptest::option::of(0i64..50)), 0..30).prop_map(
                |entries| {
                    entries
                        .into_iter()
                        .enumerate()
                        .map(|(i, (stock, alert))| {
                            product(&format!("p-{i}"), &format!("Item {i}"), stock, alert)
                        })
                        .collect()
                },
            )
        }

        proptest! {
            /// Property: the feed contains exactly the under-threshold
            /// products, in snapshot order.
            #[test]
            fn feed_matches_threshold_predicate(products in arb_products()) {
                let mut feed = NotificationFeed::new();
                feed.rebuild(&products, Utc::now());

                let expected: Vec<&Product> =
                    products.iter().filter(|p| p.is_low_stock()).collect();
                let visible = feed.notifications();
                prop_assert_eq!(visible.len(), expected.len());
                for (notification, product) in visible.iter().zip(expected) {
                    prop_assert_eq!(&notification.product_id, &product.id);
                }
            }

            /// Property: unseen never exceeds the list length and marking
            /// can never underflow it.
            #[test]
            fn unseen_count_is_bounded(
                products in arb_products(),
                marks in prop::collection::vec(0usize..40, 0..60),
            ) {
                let mut feed = NotificationFeed::new();
                feed.rebuild(&products, Utc::now());

                for mark in marks {
                    feed.mark_as_seen(&ProductId::new(format!("p-{mark}")));
                    prop_assert!(feed.unseen_count() <= feed.len());
                }

                feed.mark_all_as_seen();
                prop_assert_eq!(feed.unseen_count(), 0);
            }

            /// Property: search never changes the badge count.
            #[test]
            fn search_is_badge_neutral(products in arb_products(), query in ".{0,12}") {
                let mut feed = NotificationFeed::new();
                feed.rebuild(&products, Utc::now());
                let badge = feed.unseen_count();
                feed.set_search_query(query);
                prop_assert_eq!(feed.unseen_count(), badge);
            }
        }
    }
}
