//! HTTP fingerprint skill: the enrichment pipeline posts batches of base64
//! document payloads and gets the content fingerprint of each back. One bad
//! record never fails the batch; it gets its own error entry instead.

use axum::routing::post;
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vigil_core::fingerprint::Fingerprint;
use vigil_core::observability::metrics;

#[derive(Debug, Deserialize)]
pub struct SkillRequest {
    pub values: Vec<SkillRecord>,
}

#[derive(Debug, Deserialize)]
pub struct SkillRecord {
    #[serde(rename = "recordId")]
    pub record_id: String,
    #[serde(default)]
    pub data: SkillInput,
}

#[derive(Debug, Default, Deserialize)]
pub struct SkillInput {
    #[serde(default)]
    pub file_input: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SkillResponse {
    pub values: Vec<SkillResult>,
}

#[derive(Debug, Serialize)]
pub struct SkillResult {
    #[serde(rename = "recordId")]
    pub record_id: String,
    pub data: SkillOutput,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SkillMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<SkillMessage>,
}

#[derive(Debug, Default, Serialize)]
pub struct SkillOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SkillMessage {
    pub message: String,
}

pub fn fingerprint_records(request: SkillRequest) -> SkillResponse {
    let values = request
        .values
        .into_iter()
        .map(|record| {
            let mut result = SkillResult {
                record_id: record.record_id,
                data: SkillOutput::default(),
                warnings: Vec::new(),
                errors: Vec::new(),
            };
            match record.data.file_input.as_deref() {
                Some(encoded) if !encoded.is_empty() => match STANDARD.decode(encoded) {
                    Ok(bytes) => {
                        result.data.fingerprint =
                            Some(Fingerprint::of(&bytes).as_hex().to_string());
                        metrics::skill::record_hashed();
                    }
                    Err(err) => {
                        warn!(record_id = %result.record_id, error = %err, "undecodable payload");
                        result.errors.push(SkillMessage {
                            message: format!("payload is not valid base64: {}", err),
                        });
                        metrics::skill::record_failed();
                    }
                },
                _ => {
                    result.warnings.push(SkillMessage {
                        message: "file content was empty".to_string(),
                    });
                }
            }
            result
        })
        .collect();
    SkillResponse { values }
}

async fn handle(Json(request): Json<SkillRequest>) -> Json<SkillResponse> {
    info!(records = request.values.len(), "fingerprint skill request");
    Json(fingerprint_records(request))
}

pub async fn serve(port: u16) -> anyhow::Result<()> {
    let app = Router::new().route("/api/fingerprint", post(handle));
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    println!("Fingerprint skill listening on {}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
