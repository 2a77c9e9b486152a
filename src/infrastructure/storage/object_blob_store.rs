use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as StorePath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::domain::{ApplicantId, BlobKey, RESUME_CONTENT_TYPE, TenantId};

pub const LOCAL_URL_PREFIX: &str = "/api/resumes";

/// `BlobStore` over any `object_store` backend. File URLs are
/// `{url_prefix}/{key}`; `download` accepts only URLs under its own prefix.
pub struct ObjectBlobStore {
    inner: Arc<dyn ObjectStore>,
    url_prefix: String,
    set_content_type: bool,
}

impl ObjectBlobStore {
    pub fn new(inner: Arc<dyn ObjectStore>, url_prefix: impl Into<String>) -> Self {
        Self {
            inner,
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
            set_content_type: false,
        }
    }

    pub fn local(base_path: PathBuf) -> Result<Self, BlobStoreError> {
        std::fs::create_dir_all(&base_path)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| BlobStoreError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(fs), LOCAL_URL_PREFIX))
    }

    pub fn azure(account: &str, access_key: &str, container: &str) -> Result<Self, BlobStoreError> {
        let store = MicrosoftAzureBuilder::new()
            .with_account(account)
            .with_access_key(access_key)
            .with_container_name(container)
            .build()
            .map_err(|e| BlobStoreError::Configuration(e.to_string()))?;

        let mut blob_store = Self::new(
            Arc::new(store),
            format!("https://{account}.blob.core.windows.net/{container}"),
        );
        blob_store.set_content_type = true;
        Ok(blob_store)
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()), LOCAL_URL_PREFIX)
    }

    pub fn url_for(&self, key: &BlobKey) -> String {
        format!("{}/{}", self.url_prefix, key)
    }

    pub fn key_from_url<'a>(&self, url: &'a str) -> Result<&'a str, BlobStoreError> {
        url.strip_prefix(self.url_prefix.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|key| !key.is_empty())
            .ok_or_else(|| BlobStoreError::InvalidUrl(url.to_string()))
    }

    fn put_options(&self) -> PutOptions {
        let mut attributes = Attributes::new();
        if self.set_content_type {
            attributes.insert(Attribute::ContentType, RESUME_CONTENT_TYPE.into());
        }
        PutOptions {
            attributes,
            ..Default::default()
        }
    }
}

#[async_trait]
impl BlobStore for ObjectBlobStore {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn upload(
        &self,
        tenant_id: &TenantId,
        owner_id: &ApplicantId,
        data: &[u8],
        file_name: &str,
    ) -> Result<String, BlobStoreError> {
        let key = BlobKey::new(tenant_id, owner_id, file_name, Utc::now().timestamp_millis());
        let path = StorePath::parse(key.as_str())
            .map_err(|e| BlobStoreError::UploadFailed(e.to_string()))?;

        self.inner
            .put_opts(&path, PutPayload::from(Bytes::copy_from_slice(data)), self.put_options())
            .await
            .map_err(|e| BlobStoreError::UploadFailed(e.to_string()))?;

        tracing::debug!(key = %key, "Resume file stored");
        Ok(self.url_for(&key))
    }

    #[tracing::instrument(skip(self))]
    async fn download(&self, url: &str) -> Result<Vec<u8>, BlobStoreError> {
        let key = self.key_from_url(url)?;
        let path =
            StorePath::parse(key).map_err(|e| BlobStoreError::InvalidUrl(e.to_string()))?;

        let result = self.inner.get(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => BlobStoreError::NotFound(key.to_string()),
            other => BlobStoreError::DownloadFailed(other.to_string()),
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| BlobStoreError::DownloadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, url: &str) -> Result<(), BlobStoreError> {
        let key = self.key_from_url(url)?;
        let path =
            StorePath::parse(key).map_err(|e| BlobStoreError::InvalidUrl(e.to_string()))?;

        match self.inner.delete(&path).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(BlobStoreError::DeleteFailed(e.to_string())),
        }
    }
}
