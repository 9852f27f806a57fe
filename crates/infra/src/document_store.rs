//! In-memory document store adapter.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use backoffice_catalog::{Document, DocumentPage, DocumentStore, Query, StoreError};

#[derive(Default)]
struct Collections {
    /// Insertion-ordered documents per collection; ids unique within one.
    collections: HashMap<String, Vec<Document>>,
    fail_with: Option<StoreError>,
}

/// Document store held entirely in memory.
///
/// Listing honors `Limit`, `Offset`, `CursorAfter` and the order queries;
/// the default order is insertion order, like the backing service's
/// creation-time default.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    inner: Mutex<Collections>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection, replacing its current contents.
    pub fn seed(&self, collection: &str, documents: Vec<Document>) {
        self.lock().collections.insert(collection.to_string(), documents);
    }

    /// Make every subsequent call fail with `error` (test knob for upstream
    /// failure paths); `clear_failure` restores normal behavior.
    pub fn fail_with(&self, error: StoreError) {
        self.lock().fail_with = Some(error);
    }

    pub fn clear_failure(&self) {
        self.lock().fail_with = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Collections> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_failure(guard: &std::sync::MutexGuard<'_, Collections>) -> Result<(), StoreError> {
        match &guard.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(
        &self,
        collection: &str,
        id: &str,
        data: Map<String, Value>,
    ) -> Result<Document, StoreError> {
        let mut guard = self.lock();
        Self::check_failure(&guard)?;

        let documents = guard.collections.entry(collection.to_string()).or_default();
        if documents.iter().any(|d| d.id == id) {
            return Err(StoreError::AlreadyExists);
        }
        let document = Document::new(id, data);
        documents.push(document.clone());
        Ok(document)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        let guard = self.lock();
        Self::check_failure(&guard)?;

        guard
            .collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<Document, StoreError> {
        let mut guard = self.lock();
        Self::check_failure(&guard)?;

        let document = guard
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or(StoreError::NotFound)?;
        for (key, value) in patch {
            document.data.insert(key, value);
        }
        Ok(document.clone())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut guard = self.lock();
        Self::check_failure(&guard)?;

        let documents = guard.collections.get_mut(collection).ok_or(StoreError::NotFound)?;
        let before = documents.len();
        documents.retain(|d| d.id != id);
        if documents.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list(&self, collection: &str, queries: &[Query]) -> Result<DocumentPage, StoreError> {
        let guard = self.lock();
        Self::check_failure(&guard)?;

        let mut documents: Vec<Document> = guard
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default();
        let total = documents.len() as u64;

        let mut limit = total;
        let mut offset = 0usize;

        for query in queries {
            match query {
                Query::OrderAsc(field) => {
                    documents.sort_by(|a, b| order_key(a, field).cmp(&order_key(b, field)));
                }
                Query::OrderDesc(field) => {
                    documents.sort_by(|a, b| order_key(b, field).cmp(&order_key(a, field)));
                }
                _ => {}
            }
        }

        for query in queries {
            match query {
                Query::Limit(n) => limit = *n,
                Query::Offset(n) => offset = *n as usize,
                Query::CursorAfter(id) => {
                    let position = documents
                        .iter()
                        .position(|d| &d.id == id)
                        .ok_or_else(|| StoreError::InvalidCursor(id.clone()))?;
                    offset = position + 1;
                }
                Query::OrderAsc(_) | Query::OrderDesc(_) => {}
            }
        }

        let documents = documents
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .collect();
        Ok(DocumentPage { documents, total })
    }
}

fn order_key(document: &Document, field: &str) -> String {
    match document.data.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_catalog::list_all;
    use serde_json::json;

    fn doc(id: &str, name: &str) -> Document {
        let Value::Object(map) = json!({ "name": name }) else {
            unreachable!()
        };
        Document::new(id, map)
    }

    #[tokio::test]
    async fn create_get_update_delete_round_trip() {
        let store = InMemoryDocumentStore::new();
        let Value::Object(data) = json!({ "name": "Milk", "stockQuantity": 8 }) else {
            unreachable!()
        };

        store.create("products", "p-1", data).await.unwrap();
        let fetched = store.get("products", "p-1").await.unwrap();
        assert_eq!(fetched.data["name"], "Milk");

        let Value::Object(patch) = json!({ "stockQuantity": 2 }) else {
            unreachable!()
        };
        let updated = store.update("products", "p-1", patch).await.unwrap();
        assert_eq!(updated.data["stockQuantity"], 2);
        assert_eq!(updated.data["name"], "Milk");

        store.delete("products", "p-1").await.unwrap();
        assert_eq!(store.get("products", "p-1").await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let store = InMemoryDocumentStore::new();
        store.create("products", "p-1", Map::new()).await.unwrap();
        let err = store.create("products", "p-1", Map::new()).await.unwrap_err();
        assert_eq!(err, StoreError::AlreadyExists);
    }

    #[tokio::test]
    async fn cursor_pagination_walks_insertion_order() {
        let store = InMemoryDocumentStore::new();
        store.seed(
            "products",
            (0..7).map(|i| doc(&format!("p-{i}"), &format!("Item {i}"))).collect(),
        );

        let page = store
            .list("products", &[Query::Limit(3)])
            .await
            .unwrap();
        assert_eq!(page.total, 7);
        assert_eq!(page.documents.last().unwrap().id, "p-2");

        let page = store
            .list(
                "products",
                &[Query::Limit(3), Query::CursorAfter("p-2".to_string())],
            )
            .await
            .unwrap();
        assert_eq!(page.documents.first().unwrap().id, "p-3");

        let all = list_all(&store, "products", 3).await.unwrap();
        assert_eq!(all.len(), 7);
    }

    #[tokio::test]
    async fn unknown_cursor_is_an_error() {
        let store = InMemoryDocumentStore::new();
        store.seed("products", vec![doc("p-1", "Milk")]);
        let err = store
            .list("products", &[Query::CursorAfter("ghost".to_string())])
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::InvalidCursor("ghost".to_string()));
    }

    #[tokio::test]
    async fn order_by_sorts_before_slicing() {
        let store = InMemoryDocumentStore::new();
        store.seed(
            "products",
            vec![doc("p-1", "Walnuts"), doc("p-2", "Apples"), doc("p-3", "Milk")],
        );

        let page = store
            .list(
                "products",
                &[Query::OrderAsc("name".to_string()), Query::Limit(2)],
            )
            .await
            .unwrap();
        let names: Vec<&str> = page
            .documents
            .iter()
            .map(|d| d.data["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Apples", "Milk"]);
    }

    #[tokio::test]
    async fn scripted_failure_hits_every_call() {
        let store = InMemoryDocumentStore::new();
        store.seed("products", vec![doc("p-1", "Milk")]);
        store.fail_with(StoreError::Transport("backend down".to_string()));

        assert!(store.list("products", &[]).await.is_err());
        assert!(store.get("products", "p-1").await.is_err());

        store.clear_failure();
        assert!(store.get("products", "p-1").await.is_ok());
    }
}
