use async_trait::async_trait;

use crate::domain::{ApplicantId, TenantId};

/// Raw résumé file storage. Bytes written by `upload` are returned unmodified
/// by `download` given the returned URL.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(
        &self,
        tenant_id: &TenantId,
        owner_id: &ApplicantId,
        data: &[u8],
        file_name: &str,
    ) -> Result<String, BlobStoreError>;

    async fn download(&self, url: &str) -> Result<Vec<u8>, BlobStoreError>;

    /// Removing an object that does not exist succeeds.
    async fn delete(&self, url: &str) -> Result<(), BlobStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("invalid file url: {0}")]
    InvalidUrl(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
