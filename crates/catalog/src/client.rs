//! Fetching the full catalog snapshot.

use std::sync::Arc;

use tracing::debug;

use crate::product::Product;
use crate::store::{list_all, DocumentStore, StoreError};

/// Catalog listing page size.
pub const CATALOG_PAGE_LIMIT: u64 = 100;

/// Read-only client for the catalog collection.
pub struct CatalogClient {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl CatalogClient {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Fetch every product, paging until a short page.
    ///
    /// Unusable rows are skipped by the mapping; a transport failure aborts
    /// the whole snapshot (callers surface it as an error state rather than
    /// working from a partial catalog).
    pub async fn fetch_all(&self) -> Result<Vec<Product>, StoreError> {
        let documents = list_all(self.store.as_ref(), &self.collection, CATALOG_PAGE_LIMIT).await?;
        let products: Vec<Product> = documents.iter().filter_map(Product::from_document).collect();
        debug!(
            collection = %self.collection,
            fetched = documents.len(),
            mapped = products.len(),
            "catalog snapshot refreshed"
        );
        Ok(products)
    }
}
