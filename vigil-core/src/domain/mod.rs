use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;

/// One submitted document, alive only for the duration of a single request.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub bytes: Vec<u8>,
    pub original_filename: String,
    /// Extension including the leading dot (".pdf"), lowercased; empty when
    /// the declared filename carries none.
    pub extension: String,
}

impl Artifact {
    pub fn new(original_filename: &str, bytes: Vec<u8>) -> Self {
        let extension = Path::new(original_filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();
        Artifact {
            bytes,
            original_filename: original_filename.to_string(),
            extension,
        }
    }
}

/// Verdict of one submission; shown once to the submitter and discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Artifact persisted under its content key; downstream analysis runs
    /// out of band.
    Accepted { fingerprint: Fingerprint },
    /// A record with this fingerprint already exists (or the check could not
    /// be completed). Nothing was written.
    Rejected { fingerprint_prefix: String },
}

/// Durable entry in the external search index, keyed by fingerprint.
/// Written only by the background indexer; the gate only ever reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexRecord {
    pub id: String,
    pub fingerprint: String,
    pub status: String,
    pub filename: String,
    pub processed_timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased_with_leading_dot() {
        let artifact = Artifact::new("Invoice.PDF", vec![1, 2, 3]);
        assert_eq!(artifact.extension, ".pdf");
        assert_eq!(artifact.original_filename, "Invoice.PDF");
    }

    #[test]
    fn missing_extension_is_empty() {
        let artifact = Artifact::new("receipt", vec![1]);
        assert_eq!(artifact.extension, "");
    }

    #[test]
    fn multi_dot_filename_keeps_last_extension() {
        let artifact = Artifact::new("scan.final.jpeg", vec![1]);
        assert_eq!(artifact.extension, ".jpeg");
    }
}
