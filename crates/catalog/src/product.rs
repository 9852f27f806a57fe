//! The product snapshot model and its lenient document mapping.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use backoffice_core::{FileId, ProductId};

use crate::blob::BlobStore;
use crate::store::Document;

/// Stock level below which a product alerts when it carries no per-product
/// threshold of its own.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 20;

/// A product as the notification deriver and dashboards see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub stock_quantity: i64,
    /// Per-product alert threshold; non-positive values are ignored.
    pub low_stock_alert: Option<i64>,
    pub is_on_sale: bool,
    pub is_wholesale: bool,
    pub image_ids: Vec<FileId>,
}

impl Product {
    /// The effective alert threshold: the per-product value if present and
    /// positive, otherwise the global default.
    pub fn stock_threshold(&self) -> i64 {
        match self.low_stock_alert {
            Some(threshold) if threshold > 0 => threshold,
            _ => DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity < self.stock_threshold()
    }

    /// Map a raw catalog document, coercing loosely-typed fields.
    ///
    /// The catalog collection stores numbers and booleans inconsistently
    /// (numeric strings, 0/1 flags), so coercion is lenient. A row without a
    /// usable name is skipped, not fatal.
    pub fn from_document(doc: &Document) -> Option<Self> {
        let name = doc.data.get("name").and_then(Value::as_str).map(str::trim);
        let Some(name) = name.filter(|n| !n.is_empty()) else {
            warn!(id = %doc.id, "skipping catalog document without a name");
            return None;
        };

        let image_ids = doc
            .data
            .get("imageIds")
            .and_then(Value::as_array)
            .map(|ids| {
                ids.iter()
                    .filter_map(Value::as_str)
                    .map(FileId::new)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            id: ProductId::new(doc.id.clone()),
            name: name.to_string(),
            price: doc.data.get("price").and_then(coerce_f64).unwrap_or(0.0),
            stock_quantity: doc
                .data
                .get("stockQuantity")
                .and_then(coerce_i64)
                .unwrap_or(0),
            low_stock_alert: doc.data.get("lowStockAlert").and_then(coerce_i64),
            is_on_sale: doc.data.get("isOnSale").and_then(coerce_bool).unwrap_or(false),
            is_wholesale: doc
                .data
                .get("isWholesaleProduct")
                .and_then(coerce_bool)
                .unwrap_or(false),
            image_ids,
        })
    }

    /// Preview URLs for this product's images in the given bucket.
    pub fn image_preview_urls(&self, blobs: &dyn BlobStore, bucket: &str) -> Vec<String> {
        self.image_ids
            .iter()
            .map(|id| blobs.file_preview_url(bucket, id))
            .collect()
    }
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
