mod object_blob_store;
mod store_factory;

pub use object_blob_store::{LOCAL_URL_PREFIX, ObjectBlobStore};
pub use store_factory::BlobStoreFactory;
