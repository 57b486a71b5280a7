use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;
use vigil_core::common::error::{Result, VigilError};
use vigil_core::ports::BlobStore;

use crate::client::TranslatorClient;

/// Public URL of one container, handed to the translation collaborator so it
/// can read the source and populate the target itself.
pub fn container_url(endpoint: &str, container: &str) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), container)
}

/// Asynchronous document translation: stage the source blob, clear the
/// target slot, hand both container URLs to the collaborator, poll until a
/// terminal state, then fetch the translated blob.
pub struct DocumentTranslation {
    pub client: TranslatorClient,
    pub source: Arc<dyn BlobStore>,
    pub target: Arc<dyn BlobStore>,
    pub source_url: String,
    pub target_url: String,
}

impl DocumentTranslation {
    pub async fn run(&self, local_path: &Path, blob_name: &str, language: &str) -> Result<PathBuf> {
        let bytes = fs::read(local_path)?;
        self.source
            .put(blob_name, &bytes, &HashMap::new(), true)
            .await?;
        info!(blob = %blob_name, size_bytes = bytes.len(), "source document staged");

        // The collaborator refuses to overwrite an existing target blob
        self.target.delete(blob_name).await?;

        let status_url = self
            .client
            .begin_batch(&self.source_url, &self.target_url, language)
            .await?;
        info!(status_url = %status_url, "batch operation started");

        let progress = self.client.wait_until_terminal(&status_url).await?;
        if !progress.succeeded() {
            let detail = progress
                .error
                .map(|err| err.message)
                .unwrap_or_else(|| "no detail reported".to_string());
            return Err(VigilError::Collaborator {
                message: format!("translation ended as {}: {}", progress.status, detail),
            });
        }

        let translated = self.target.get(blob_name).await?;
        let output_path = translated_path(local_path);
        fs::write(&output_path, translated)?;
        info!(path = %output_path.display(), "translated document downloaded");
        Ok(output_path)
    }
}

/// `dir/file.pdf` -> `dir/translated_file.pdf`, next to the input.
fn translated_path(local_path: &Path) -> PathBuf {
    let file_name = local_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    match local_path.parent() {
        Some(parent) => parent.join(format!("translated_{}", file_name)),
        None => PathBuf::from(format!("translated_{}", file_name)),
    }
}
