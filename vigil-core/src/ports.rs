use std::collections::HashMap;

use async_trait::async_trait;

use crate::common::error::Result;
use crate::domain::IndexRecord;

/// Blob storage collaborator. Keys are opaque strings; the gate always
/// derives them as fingerprint + original extension.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        metadata: &HashMap<String, String>,
        overwrite: bool,
    ) -> Result<()>;

    async fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Deleting an absent key succeeds; the caller only cares that the key
    /// is gone afterwards.
    async fn delete(&self, key: &str) -> Result<()>;

    async fn list(&self, prefix: &str) -> Result<Vec<String>>;
}

/// Search-index collaborator. The gate reads counts; only the background
/// indexer writes records.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Count of records whose fingerprint field equals `fingerprint`,
    /// requested count-only so no record bodies travel back.
    async fn count_by_fingerprint(&self, fingerprint: &str) -> Result<u64>;

    /// Merge-or-upload, so reprocessing the same blob is idempotent.
    async fn upsert_record(&self, record: &IndexRecord) -> Result<()>;
}
