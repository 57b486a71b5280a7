use async_trait::async_trait;
use serde_json::json;

use crate::common::error::{Result, VigilError};
use crate::config::SearchConfig;
use crate::domain::IndexRecord;
use crate::ports::SearchIndex;

const API_VERSION: &str = "2023-11-01";

/// REST adapter for the managed search collaborator. The gate issues
/// count-only queries; the indexer issues merge-or-upload writes.
pub struct HttpSearchIndex {
    http: reqwest::Client,
    endpoint: String,
    index_name: String,
    api_key: String,
}

impl HttpSearchIndex {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            index_name: config.index_name.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn docs_url(&self, operation: &str) -> String {
        format!(
            "{}/indexes/{}/docs/{}?api-version={}",
            self.endpoint, self.index_name, operation, API_VERSION
        )
    }
}

#[async_trait]
impl SearchIndex for HttpSearchIndex {
    async fn count_by_fingerprint(&self, fingerprint: &str) -> Result<u64> {
        // Count-only query: no record bodies travel back, just the total.
        let body = json!({
            "search": "*",
            "filter": format!("fingerprint eq '{}'", fingerprint),
            "count": true,
            "top": 0,
        });
        let resp = self
            .http
            .post(self.docs_url("search"))
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            return Err(VigilError::Collaborator {
                message: format!("index query failed: {} - {}", status, detail),
            });
        }
        let reply: serde_json::Value = resp.json().await?;
        reply
            .get("@odata.count")
            .and_then(|count| count.as_u64())
            .ok_or_else(|| VigilError::Collaborator {
                message: "index query reply carried no count".to_string(),
            })
    }

    async fn upsert_record(&self, record: &IndexRecord) -> Result<()> {
        let body = json!({
            "value": [{
                "@search.action": "mergeOrUpload",
                "id": record.id,
                "fingerprint": record.fingerprint,
                "status": record.status,
                "filename": record.filename,
                "processed_timestamp": record.processed_timestamp,
            }]
        });
        let resp = self
            .http
            .post(self.docs_url("index"))
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            return Err(VigilError::Collaborator {
                message: format!("index upsert failed: {} - {}", status, detail),
            });
        }
        let reply: serde_json::Value = resp.json().await?;
        let succeeded = reply["value"][0]["status"].as_bool().unwrap_or(false);
        if !succeeded {
            let reason = reply["value"][0]["errorMessage"]
                .as_str()
                .unwrap_or("unknown")
                .to_string();
            return Err(VigilError::Collaborator {
                message: format!("index rejected record {}: {}", record.id, reason),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpSearchIndex {
        HttpSearchIndex::new(&SearchConfig {
            endpoint: "https://search.example.net/".to_string(),
            api_key: "key".to_string(),
            index_name: "fraud-watch".to_string(),
        })
    }

    #[test]
    fn docs_url_targets_the_configured_index() {
        assert_eq!(
            client().docs_url("search"),
            "https://search.example.net/indexes/fraud-watch/docs/search?api-version=2023-11-01"
        );
    }
}
