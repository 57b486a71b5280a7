use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::common::error::Result;
use crate::domain::{Artifact, SubmissionOutcome};
use crate::fingerprint::Fingerprint;
use crate::gate::oracle::DuplicateOracle;
use crate::observability::metrics;
use crate::ports::BlobStore;

/// Metadata key carrying the submitter's declared filename alongside the
/// stored bytes. This name is part of the contract with the background
/// indexer.
pub const ORIGINAL_FILENAME_META: &str = "original_filename";

/// Decides per submission whether an artifact is admitted into the pipeline
/// or rejected as a duplicate. Holds no cross-submission state: every call
/// runs checking -> verdict and returns, leaving races between identical
/// concurrent submissions to the store's overwrite-by-same-key semantics.
pub struct SubmissionGate {
    oracle: DuplicateOracle,
    store: Arc<dyn BlobStore>,
}

impl SubmissionGate {
    pub fn new(oracle: DuplicateOracle, store: Arc<dyn BlobStore>) -> Self {
        Self { oracle, store }
    }

    /// Fingerprint, duplicate check, then either reject (zero writes) or
    /// admit with a single idempotent write under the content-derived key.
    /// A storage failure is returned as an error for the surface to report;
    /// there is no automatic retry, since re-submission is itself idempotent.
    pub async fn submit(&self, artifact: Artifact) -> Result<SubmissionOutcome> {
        let fingerprint = Fingerprint::of(&artifact.bytes);
        debug!(
            fingerprint = %fingerprint.prefix(),
            size_bytes = artifact.bytes.len(),
            "checking submission"
        );

        if self.oracle.exists(&fingerprint).await {
            metrics::gate::submission_rejected();
            info!(fingerprint = %fingerprint.prefix(), "submission rejected as duplicate");
            return Ok(SubmissionOutcome::Rejected {
                fingerprint_prefix: fingerprint.prefix().to_string(),
            });
        }

        let key = format!("{}{}", fingerprint.as_hex(), artifact.extension);
        let mut metadata = HashMap::new();
        metadata.insert(
            ORIGINAL_FILENAME_META.to_string(),
            artifact.original_filename.clone(),
        );

        match self.store.put(&key, &artifact.bytes, &metadata, true).await {
            Ok(()) => metrics::store::write_success(),
            Err(err) => {
                metrics::store::write_error();
                return Err(err);
            }
        }

        metrics::gate::submission_accepted();
        info!(key = %key, "artifact admitted, pending background analysis");
        Ok(SubmissionOutcome::Accepted { fingerprint })
    }
}
