//! The blob-store port: product imagery and other uploaded assets.

use async_trait::async_trait;

use backoffice_core::FileId;

use crate::store::StoreError;

/// Async port over the external file service.
///
/// URL derivation is synchronous: preview/download URLs are deterministic
/// functions of (bucket, id), not round-trips.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn create_file(
        &self,
        bucket: &str,
        id: &FileId,
        bytes: Vec<u8>,
    ) -> Result<FileId, StoreError>;

    async fn delete_file(&self, bucket: &str, id: &FileId) -> Result<(), StoreError>;

    async fn list_files(&self, bucket: &str) -> Result<Vec<FileId>, StoreError>;

    fn file_preview_url(&self, bucket: &str, id: &FileId) -> String;

    fn file_download_url(&self, bucket: &str, id: &FileId) -> String;
}
