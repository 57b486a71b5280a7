use std::sync::Arc;

use tracing::error;

use crate::fingerprint::Fingerprint;
use crate::observability::metrics;
use crate::ports::SearchIndex;

/// Verdict applied when the index cannot be queried: an indeterminate check
/// counts as a duplicate. A false rejection is recoverable by an operator;
/// an undetected duplicate entering the pipeline is not.
pub fn resolve_on_failure() -> bool {
    true
}

/// Answers "has this fingerprint been seen before?" against the external
/// search index.
pub struct DuplicateOracle {
    index: Arc<dyn SearchIndex>,
}

impl DuplicateOracle {
    pub fn new(index: Arc<dyn SearchIndex>) -> Self {
        Self { index }
    }

    /// Never fails: a query error collapses to `resolve_on_failure()` rather
    /// than surfacing as an "unknown" state. Full error detail is log-only.
    pub async fn exists(&self, fingerprint: &Fingerprint) -> bool {
        match self.index.count_by_fingerprint(fingerprint.as_hex()).await {
            Ok(count) => {
                metrics::oracle::query_success();
                count > 0
            }
            Err(err) => {
                error!(
                    error = %err,
                    fingerprint = %fingerprint.prefix(),
                    "index query failed, assuming duplicate"
                );
                metrics::oracle::query_error();
                resolve_on_failure()
            }
        }
    }
}
