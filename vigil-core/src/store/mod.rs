pub mod blob_fs;
pub mod blob_http;

use std::sync::Arc;

use crate::config::StorageConfig;
use crate::ports::BlobStore;

/// Build a blob store for one container from the environment-selected
/// backend.
pub fn open_store(config: &StorageConfig, container: &str) -> Arc<dyn BlobStore> {
    match config {
        StorageConfig::Http { endpoint, sas_token } => Arc::new(
            blob_http::HttpBlobStore::new(endpoint.clone(), container, sas_token.clone()),
        ),
        StorageConfig::Fs { root } => Arc::new(blob_fs::FsBlobStore::new(root, container)),
    }
}
