use std::env;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::info;
use vigil_core::common::error::{Result, VigilError};

const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Connection settings for the translation collaborator.
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    pub endpoint: String,
    pub key: String,
    pub region: String,
}

impl TranslatorConfig {
    pub fn from_env() -> Result<Self> {
        Ok(TranslatorConfig {
            endpoint: required_var("TRANSLATOR_ENDPOINT")?,
            key: required_var("TRANSLATOR_KEY")?,
            region: required_var("TRANSLATOR_REGION")?,
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| VigilError::Config {
        message: format!("missing required environment variable {}", name),
    })
}

/// One translated rendering of the submitted text.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslatedText {
    pub to: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectedLanguage {
    pub language: String,
    pub score: Option<f64>,
}

/// Reply for one input text: translations per target language, plus the
/// detected source language when none was declared.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationReply {
    #[serde(rename = "detectedLanguage")]
    pub detected_language: Option<DetectedLanguage>,
    pub translations: Vec<TranslatedText>,
}

/// Progress report of a batch document operation.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchProgress {
    pub status: String,
    pub error: Option<BatchError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchError {
    pub message: String,
}

impl BatchProgress {
    pub fn is_terminal(&self) -> bool {
        matches!(self.status.as_str(), "Succeeded" | "Failed" | "Canceled")
    }

    pub fn succeeded(&self) -> bool {
        self.status == "Succeeded"
    }
}

/// Body of a batch submission: one source container, one target container
/// with its language.
pub fn batch_request_body(source_url: &str, target_url: &str, language: &str) -> serde_json::Value {
    json!({
        "inputs": [{
            "source": {
                "sourceUrl": source_url,
                "storageSource": "AzureBlob",
            },
            "targets": [{
                "targetUrl": target_url,
                "language": language,
                "storageSource": "AzureBlob",
            }],
        }]
    })
}

pub struct TranslatorClient {
    http: reqwest::Client,
    config: TranslatorConfig,
}

impl TranslatorClient {
    pub fn new(config: TranslatorConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Inline text translation. With no source language the collaborator
    /// auto-detects and reports it back in the reply.
    pub async fn translate(
        &self,
        text: &str,
        from: Option<&str>,
        to: &[String],
    ) -> Result<Vec<TranslationReply>> {
        let url = format!("{}/translate", self.config.endpoint.trim_end_matches('/'));

        let mut params: Vec<(&str, String)> = vec![("api-version", "3.0".to_string())];
        for target in to {
            params.push(("to", target.clone()));
        }
        if let Some(from) = from {
            params.push(("from", from.to_string()));
        }

        let resp = self
            .http
            .post(&url)
            .query(&params)
            .header("Ocp-Apim-Subscription-Key", &self.config.key)
            .header("Ocp-Apim-Subscription-Region", &self.config.region)
            .header("X-ClientTraceId", uuid::Uuid::new_v4().to_string())
            .json(&json!([{ "text": text }]))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            return Err(VigilError::Collaborator {
                message: format!("translation request failed: {} - {}", status, detail),
            });
        }
        Ok(resp.json().await?)
    }

    /// Start a batch document operation; returns the status URL handed back
    /// by the collaborator.
    pub async fn begin_batch(
        &self,
        source_url: &str,
        target_url: &str,
        language: &str,
    ) -> Result<String> {
        let url = format!(
            "{}/translator/text/batch/v1.1/batches",
            self.config.endpoint.trim_end_matches('/')
        );
        let resp = self
            .http
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.config.key)
            .json(&batch_request_body(source_url, target_url, language))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            return Err(VigilError::Collaborator {
                message: format!("batch submission failed: {} - {}", status, detail),
            });
        }
        resp.headers()
            .get("Operation-Location")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string())
            .ok_or_else(|| VigilError::Collaborator {
                message: "batch submission reply carried no Operation-Location".to_string(),
            })
    }

    pub async fn batch_progress(&self, status_url: &str) -> Result<BatchProgress> {
        let resp = self
            .http
            .get(status_url)
            .header("Ocp-Apim-Subscription-Key", &self.config.key)
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            return Err(VigilError::Collaborator {
                message: format!("status poll failed: {} - {}", status, detail),
            });
        }
        Ok(resp.json().await?)
    }

    /// Poll the status URL until the operation reaches a terminal state.
    pub async fn wait_until_terminal(&self, status_url: &str) -> Result<BatchProgress> {
        loop {
            let progress = self.batch_progress(status_url).await?;
            info!(status = %progress.status, "batch operation status");
            println!("Current operation status: {}", progress.status);
            if progress.is_terminal() {
                return Ok(progress);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_are_recognized() {
        for status in ["Succeeded", "Failed", "Canceled"] {
            let progress = BatchProgress {
                status: status.to_string(),
                error: None,
            };
            assert!(progress.is_terminal(), "{} should be terminal", status);
        }
        for status in ["NotStarted", "Running", "Cancelling"] {
            let progress = BatchProgress {
                status: status.to_string(),
                error: None,
            };
            assert!(!progress.is_terminal(), "{} should not be terminal", status);
        }
    }

    #[test]
    fn only_succeeded_counts_as_success() {
        let ok = BatchProgress {
            status: "Succeeded".to_string(),
            error: None,
        };
        let failed = BatchProgress {
            status: "Failed".to_string(),
            error: Some(BatchError {
                message: "target exists".to_string(),
            }),
        };
        assert!(ok.succeeded());
        assert!(!failed.succeeded());
    }

    #[test]
    fn batch_body_names_source_target_and_language() {
        let body = batch_request_body(
            "https://acct.example.net/source-docs",
            "https://acct.example.net/translated-docs",
            "en",
        );
        assert_eq!(
            body["inputs"][0]["source"]["sourceUrl"],
            "https://acct.example.net/source-docs"
        );
        assert_eq!(
            body["inputs"][0]["targets"][0]["targetUrl"],
            "https://acct.example.net/translated-docs"
        );
        assert_eq!(body["inputs"][0]["targets"][0]["language"], "en");
    }

    #[test]
    fn translate_reply_parses_with_detected_language() {
        let raw = serde_json::json!([{
            "detectedLanguage": { "language": "pt", "score": 0.98 },
            "translations": [
                { "text": "Hello world", "to": "en" },
                { "text": "Hola mundo", "to": "es" }
            ]
        }]);
        let replies: Vec<TranslationReply> = serde_json::from_value(raw).unwrap();
        assert_eq!(replies.len(), 1);
        let reply = &replies[0];
        assert_eq!(reply.detected_language.as_ref().unwrap().language, "pt");
        assert_eq!(reply.translations.len(), 2);
        assert_eq!(reply.translations[0].to, "en");
        assert_eq!(reply.translations[0].text, "Hello world");
    }

    #[test]
    fn translate_reply_parses_without_detected_language() {
        let raw = serde_json::json!([{
            "translations": [{ "text": "Bonjour", "to": "fr" }]
        }]);
        let replies: Vec<TranslationReply> = serde_json::from_value(raw).unwrap();
        assert!(replies[0].detected_language.is_none());
    }
}
