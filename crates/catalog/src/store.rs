//! The document-store port: generic records with query-based listing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A record in a document collection. The payload stays schemaless here;
/// typed mapping happens at the consumer (see `product::Product`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// One page of a listing, with the collection's total count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPage {
    pub documents: Vec<Document>,
    pub total: u64,
}

/// Listing modifiers supported by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Limit(u64),
    Offset(u64),
    /// Resume listing after the record with this id.
    CursorAfter(String),
    OrderAsc(String),
    OrderDesc(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("document not found")]
    NotFound,

    #[error("document already exists")]
    AlreadyExists,

    /// The cursor id no longer exists in the collection.
    #[error("invalid cursor: {0}")]
    InvalidCursor(String),

    #[error("store transport failure: {0}")]
    Transport(String),
}

/// Async port over the external document service.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create(
        &self,
        collection: &str,
        id: &str,
        data: Map<String, Value>,
    ) -> Result<Document, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError>;

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<Document, StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    async fn list(
        &self,
        collection: &str,
        queries: &[Query],
    ) -> Result<DocumentPage, StoreError>;
}

/// Drain a collection with cursor pagination.
///
/// Each page's last record id seeds the next `CursorAfter`; a page shorter
/// than `page_size` terminates the loop.
pub async fn list_all(
    store: &dyn DocumentStore,
    collection: &str,
    page_size: u64,
) -> Result<Vec<Document>, StoreError> {
    let mut documents = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let mut queries = vec![Query::Limit(page_size)];
        if let Some(cursor) = &cursor {
            queries.push(Query::CursorAfter(cursor.clone()));
        }

        let page = store.list(collection, &queries).await?;
        let fetched = page.documents.len() as u64;
        cursor = page.documents.last().map(|doc| doc.id.clone());
        documents.extend(page.documents);

        if fetched < page_size {
            break;
        }
    }

    Ok(documents)
}
