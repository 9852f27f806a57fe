//! `backoffice-notifications` — low-stock alert derivation.
//!
//! The feed is derived state: it is recomputed wholesale from every catalog
//! snapshot and never persisted. Seen/unseen bookkeeping and the search
//! filter are session-local UI state owned here.

pub mod feed;
pub mod notification;

pub use feed::{FeedStatus, NotificationFeed, DROPDOWN_PREVIEW_LIMIT};
pub use notification::Notification;
