use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::presentation::config::{StorageProvider, StorageSettings};

use super::object_blob_store::ObjectBlobStore;

pub struct BlobStoreFactory;

impl BlobStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn BlobStore>, BlobStoreError> {
        match settings.provider {
            StorageProvider::Local => {
                tracing::info!(path = %settings.local_path, "Using local resume storage");
                let store = ObjectBlobStore::local(PathBuf::from(&settings.local_path))?;
                Ok(Arc::new(store))
            }
            StorageProvider::Azure => {
                let account = settings.azure_account.as_deref().ok_or_else(|| {
                    BlobStoreError::Configuration("azure_account required".into())
                })?;
                let key = settings.azure_access_key.as_deref().ok_or_else(|| {
                    BlobStoreError::Configuration("azure_access_key required".into())
                })?;
                let container = settings.azure_container.as_deref().ok_or_else(|| {
                    BlobStoreError::Configuration("azure_container required".into())
                })?;
                tracing::info!(account, container, "Using Azure Blob resume storage");
                let store = ObjectBlobStore::azure(account, key, container)?;
                Ok(Arc::new(store))
            }
            StorageProvider::Memory => {
                tracing::info!("Using in-memory resume storage");
                Ok(Arc::new(ObjectBlobStore::in_memory()))
            }
        }
    }
}
