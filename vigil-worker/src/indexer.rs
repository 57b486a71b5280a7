use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use vigil_core::common::error::Result;
use vigil_core::domain::IndexRecord;
use vigil_core::fingerprint::Fingerprint;
use vigil_core::observability::metrics;
use vigil_core::ports::{BlobStore, SearchIndex};

const RECORD_STATUS: &str = "Processed";

/// Consumes stored artifacts and publishes their index records. Recomputes
/// the fingerprint from the stored bytes rather than trusting the storage
/// key, so a misnamed blob still indexes under its true content identity.
pub struct Indexer {
    store: Arc<dyn BlobStore>,
    index: Arc<dyn SearchIndex>,
}

impl Indexer {
    pub fn new(store: Arc<dyn BlobStore>, index: Arc<dyn SearchIndex>) -> Self {
        Self { store, index }
    }

    pub async fn process_blob(&self, name: &str) -> Result<IndexRecord> {
        let bytes = self.store.get(name).await?;
        let fingerprint = Fingerprint::of(&bytes);

        let filename = name.rsplit('/').next().unwrap_or(name).to_string();
        let record = IndexRecord {
            id: fingerprint.as_hex().to_string(),
            fingerprint: fingerprint.as_hex().to_string(),
            status: RECORD_STATUS.to_string(),
            filename,
            processed_timestamp: chrono::Utc::now().timestamp(),
        };

        self.index.upsert_record(&record).await?;
        metrics::indexer::record_upserted();
        info!(
            blob = %name,
            fingerprint = %fingerprint.prefix(),
            size_bytes = bytes.len(),
            "index record upserted"
        );
        Ok(record)
    }

    /// Poll loop for development runs without a trigger runtime; never
    /// returns. Keys are remembered per process only; upserts make
    /// re-indexing after a restart harmless.
    pub async fn watch(&self, interval: Duration) {
        let mut seen: HashSet<String> = HashSet::new();
        loop {
            match self.store.list("").await {
                Ok(keys) => {
                    for key in keys {
                        if seen.contains(&key) {
                            continue;
                        }
                        match self.process_blob(&key).await {
                            Ok(_) => {
                                seen.insert(key);
                            }
                            Err(err) => {
                                error!(blob = %key, error = %err, "indexing failed, will retry");
                                metrics::indexer::error();
                            }
                        }
                    }
                }
                Err(err) => {
                    error!(error = %err, "listing raw container failed");
                    metrics::indexer::error();
                }
            }
            tokio::time::sleep(interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::Mutex;
    use vigil_core::common::error::VigilError;

    struct OneBlobStore {
        key: String,
        bytes: Vec<u8>,
    }

    #[async_trait]
    impl BlobStore for OneBlobStore {
        async fn put(
            &self,
            _key: &str,
            _bytes: &[u8],
            _metadata: &HashMap<String, String>,
            _overwrite: bool,
        ) -> Result<()> {
            Ok(())
        }

        async fn get(&self, key: &str) -> Result<Vec<u8>> {
            if key == self.key {
                Ok(self.bytes.clone())
            } else {
                Err(VigilError::Collaborator {
                    message: format!("blob {} not found", key),
                })
            }
        }

        async fn delete(&self, _key: &str) -> Result<()> {
            Ok(())
        }

        async fn list(&self, _prefix: &str) -> Result<Vec<String>> {
            Ok(vec![self.key.clone()])
        }
    }

    struct RecordingIndex {
        records: Mutex<Vec<IndexRecord>>,
    }

    #[async_trait]
    impl SearchIndex for RecordingIndex {
        async fn count_by_fingerprint(&self, _fingerprint: &str) -> Result<u64> {
            Ok(0)
        }

        async fn upsert_record(&self, record: &IndexRecord) -> Result<()> {
            self.records.lock().await.push(record.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn record_is_keyed_by_content_fingerprint() {
        let store = Arc::new(OneBlobStore {
            key: "b66e.pdf".to_string(),
            bytes: b"invoice-123".to_vec(),
        });
        let index = Arc::new(RecordingIndex {
            records: Mutex::new(Vec::new()),
        });
        let indexer = Indexer::new(store, index.clone());

        let record = indexer.process_blob("b66e.pdf").await.unwrap();

        assert_eq!(
            record.fingerprint,
            "b66e5d8a3f966ab97a07d5c250d32315a12eccf733119756c85fd24e4d1d5ffb"
        );
        assert_eq!(record.id, record.fingerprint);
        assert_eq!(record.status, "Processed");

        let recorded = index.records.lock().await;
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0], record);
    }

    #[tokio::test]
    async fn filename_strips_any_path_prefix() {
        let store = Arc::new(OneBlobStore {
            key: "raw-documents/nested/scan.png".to_string(),
            bytes: b"pixels".to_vec(),
        });
        let index = Arc::new(RecordingIndex {
            records: Mutex::new(Vec::new()),
        });
        let indexer = Indexer::new(store, index);

        let record = indexer
            .process_blob("raw-documents/nested/scan.png")
            .await
            .unwrap();
        assert_eq!(record.filename, "scan.png");
    }

    #[tokio::test]
    async fn missing_blob_surfaces_an_error() {
        let store = Arc::new(OneBlobStore {
            key: "present".to_string(),
            bytes: Vec::new(),
        });
        let index = Arc::new(RecordingIndex {
            records: Mutex::new(Vec::new()),
        });
        let indexer = Indexer::new(store, index.clone());

        assert!(indexer.process_blob("absent").await.is_err());
        assert!(index.records.lock().await.is_empty());
    }
}
