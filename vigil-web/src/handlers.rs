use askama::Template;
use axum::extract::{Multipart, State};
use axum::response::{Html, IntoResponse};
use tracing::{error, warn};
use vigil_core::domain::{Artifact, SubmissionOutcome};

use crate::state::AppState;
use crate::templates::{IndexTemplate, StatusView};

/// Artifacts are documents, not bulk data; anything larger is malformed
/// input and rejected locally.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

const ALLOWED_EXTENSIONS: &[&str] = &[".pdf", ".png", ".jpg", ".jpeg"];

pub async fn index() -> impl IntoResponse {
    render(IndexTemplate { status: None })
}

pub async fn submit(State(state): State<AppState>, mut multipart: Multipart) -> impl IntoResponse {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("document") {
            continue;
        }
        let filename = field.file_name().map(|name| name.to_string());
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(err) => {
                warn!(error = %err, "unreadable upload field");
                return render(IndexTemplate {
                    status: Some(StatusView::error(
                        "The file could not be read. Please try again.".to_string(),
                    )),
                });
            }
        };
        if let Some(filename) = filename {
            upload = Some((filename, bytes));
        }
    }

    let Some((filename, bytes)) = upload else {
        return render(IndexTemplate {
            status: Some(StatusView::error(
                "Select a file before submitting.".to_string(),
            )),
        });
    };

    if let Some(reason) = local_rejection(&filename, &bytes) {
        return render(IndexTemplate {
            status: Some(StatusView::error(reason)),
        });
    }

    let outcome = state.gate.submit(Artifact::new(&filename, bytes)).await;
    let status = match outcome {
        Ok(SubmissionOutcome::Accepted { .. }) => StatusView::success(
            "Status: UNDER ANALYSIS. The document is new and was received successfully. \
             Background analysis will complete shortly."
                .to_string(),
        ),
        Ok(SubmissionOutcome::Rejected { fingerprint_prefix }) => StatusView::error(format!(
            "Status: REJECTED. This document (fingerprint {}...) already exists in the system.",
            fingerprint_prefix
        )),
        Err(err) => {
            // Full detail is log-only; submitters see a generic error status
            error!(error = %err, "submission failed");
            StatusView::error(
                "Status: ERROR. The submission could not be completed. Please try again later."
                    .to_string(),
            )
        }
    };

    render(IndexTemplate { status: Some(status) })
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn metrics(State(state): State<AppState>) -> String {
    state.metrics.render()
}

/// Boundary checks that never touch a collaborator. Returns the user-facing
/// reason when the upload is malformed.
fn local_rejection(filename: &str, bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return Some("The selected file is empty.".to_string());
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Some("The selected file is too large.".to_string());
    }
    let lowered = filename.to_lowercase();
    if !ALLOWED_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext)) {
        return Some(
            "Unsupported file type. Upload a PDF, PNG, or JPEG document.".to_string(),
        );
    }
    None
}

fn render(template: IndexTemplate) -> Html<String> {
    Html(template.render().expect("Template rendering failed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_supported_document_types() {
        for name in ["invoice.pdf", "scan.PNG", "photo.jpg", "photo.final.JPEG"] {
            assert_eq!(local_rejection(name, b"x"), None, "{} should pass", name);
        }
    }

    #[test]
    fn rejects_unsupported_extensions_locally() {
        assert!(local_rejection("malware.exe", b"x").is_some());
        assert!(local_rejection("notes.txt", b"x").is_some());
        assert!(local_rejection("no-extension", b"x").is_some());
    }

    #[test]
    fn rejects_empty_and_oversized_uploads_locally() {
        assert!(local_rejection("invoice.pdf", b"").is_some());
        let oversized = vec![0u8; MAX_UPLOAD_BYTES + 1];
        assert!(local_rejection("invoice.pdf", &oversized).is_some());
    }

    #[test]
    fn form_renders_with_and_without_a_banner() {
        let empty = IndexTemplate { status: None }.render().unwrap();
        assert!(empty.contains("Analyze Document"));

        let with_banner = IndexTemplate {
            status: Some(StatusView::error("Status: REJECTED.".to_string())),
        }
        .render()
        .unwrap();
        assert!(with_banner.contains("banner error"));
        assert!(with_banner.contains("Status: REJECTED."));
    }
}
