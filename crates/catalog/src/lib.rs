//! `backoffice-catalog` — read side of the product catalog.
//!
//! Products live in an external document service; this crate owns the ports
//! for that service ([`DocumentStore`], [`BlobStore`]), the lenient
//! document-to-product mapping, and the paginated fetch-all the
//! notification deriver consumes. Write paths (product CRUD) belong to the
//! management UI and are not modeled here.

pub mod blob;
pub mod client;
pub mod product;
pub mod store;

pub use blob::BlobStore;
pub use client::{CatalogClient, CATALOG_PAGE_LIMIT};
pub use product::{Product, DEFAULT_LOW_STOCK_THRESHOLD};
pub use store::{list_all, Document, DocumentPage, DocumentStore, Query, StoreError};
