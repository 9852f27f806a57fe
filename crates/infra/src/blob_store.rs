//! In-memory blob store adapter.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use backoffice_catalog::{BlobStore, StoreError};
use backoffice_core::FileId;

/// Blob store held in memory. URL derivation matches the backing service's
/// shape so UI snapshots look the same against either adapter.
pub struct InMemoryBlobStore {
    base_url: String,
    buckets: Mutex<HashMap<String, Vec<(FileId, Vec<u8>)>>>,
}

impl InMemoryBlobStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            buckets: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<(FileId, Vec<u8>)>>> {
        self.buckets.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn create_file(
        &self,
        bucket: &str,
        id: &FileId,
        bytes: Vec<u8>,
    ) -> Result<FileId, StoreError> {
        let mut buckets = self.lock();
        let files = buckets.entry(bucket.to_string()).or_default();
        if files.iter().any(|(existing, _)| existing == id) {
            return Err(StoreError::AlreadyExists);
        }
        files.push((id.clone(), bytes));
        Ok(id.clone())
    }

    async fn delete_file(&self, bucket: &str, id: &FileId) -> Result<(), StoreError> {
        let mut buckets = self.lock();
        let files = buckets.get_mut(bucket).ok_or(StoreError::NotFound)?;
        let before = files.len();
        files.retain(|(existing, _)| existing != id);
        if files.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list_files(&self, bucket: &str) -> Result<Vec<FileId>, StoreError> {
        Ok(self
            .lock()
            .get(bucket)
            .map(|files| files.iter().map(|(id, _)| id.clone()).collect())
            .unwrap_or_default())
    }

    fn file_preview_url(&self, bucket: &str, id: &FileId) -> String {
        format!("{}/storage/buckets/{bucket}/files/{id}/preview", self.base_url)
    }

    fn file_download_url(&self, bucket: &str, id: &FileId) -> String {
        format!("{}/storage/buckets/{bucket}/files/{id}/download", self.base_url)
    }
}
