//! The low-stock notification value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use backoffice_catalog::Product;
use backoffice_core::ProductId;

/// A derived low-stock alert. One per under-threshold product; the product
/// id doubles as the notification id, which is what makes ids unique within
/// a regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: ProductId,
    pub product_id: ProductId,
    pub title: String,
    pub message: String,
    pub seen: bool,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// Build the alert for an under-threshold product.
    pub fn low_stock(product: &Product, now: DateTime<Utc>) -> Self {
        Self {
            id: product.id.clone(),
            product_id: product.id.clone(),
            title: "Low Stock Alert".to_string(),
            message: format!(
                "{} has only {} units left (Alert threshold: {})",
                product.name,
                product.stock_quantity,
                product.stock_threshold()
            ),
            seen: false,
            timestamp: now,
        }
    }
}
