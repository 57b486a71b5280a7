use std::collections::HashMap;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::common::error::{Result, VigilError};
use crate::ports::BlobStore;

static BLOB_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<Name>([^<]+)</Name>").expect("valid blob name regex"));

/// Blob REST adapter authenticated with a container SAS token. Metadata
/// travels as `x-ms-meta-*` headers, so metadata values must stay
/// header-safe.
pub struct HttpBlobStore {
    http: reqwest::Client,
    endpoint: String,
    container: String,
    sas_token: String,
}

impl HttpBlobStore {
    pub fn new(endpoint: String, container: &str, sas_token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            container: container.to_string(),
            sas_token: sas_token.trim_start_matches('?').to_string(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}?{}",
            self.endpoint, self.container, key, self.sas_token
        )
    }

    fn container_url(&self, extra: &str) -> String {
        format!(
            "{}/{}?restype=container&comp=list{}&{}",
            self.endpoint, self.container, extra, self.sas_token
        )
    }

    async fn fail(&self, action: &str, key: &str, resp: reqwest::Response) -> VigilError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        VigilError::Collaborator {
            message: format!("blob {} failed for {}: {} - {}", action, key, status, body),
        }
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        metadata: &HashMap<String, String>,
        overwrite: bool,
    ) -> Result<()> {
        let mut request = self
            .http
            .put(self.object_url(key))
            .header("x-ms-blob-type", "BlockBlob")
            .header(CONTENT_TYPE, "application/octet-stream");
        for (name, value) in metadata {
            request = request.header(format!("x-ms-meta-{}", name), value);
        }
        if !overwrite {
            request = request.header("If-None-Match", "*");
        }
        let resp = request.body(bytes.to_vec()).send().await?;
        if !resp.status().is_success() {
            return Err(self.fail("put", key, resp).await);
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let resp = self.http.get(self.object_url(key)).send().await?;
        if !resp.status().is_success() {
            return Err(self.fail("get", key, resp).await);
        }
        Ok(resp.bytes().await?.to_vec())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let resp = self.http.delete(self.object_url(key)).send().await?;
        // Absent blobs count as deleted
        if !resp.status().is_success() && resp.status() != StatusCode::NOT_FOUND {
            return Err(self.fail("delete", key, resp).await);
        }
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let extra = if prefix.is_empty() {
            String::new()
        } else {
            format!("&prefix={}", prefix)
        };
        let resp = self.http.get(self.container_url(&extra)).send().await?;
        if !resp.status().is_success() {
            return Err(self.fail("list", prefix, resp).await);
        }
        let body = resp.text().await?;
        Ok(BLOB_NAME_RE
            .captures_iter(&body)
            .map(|cap| cap[1].to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_url_joins_endpoint_container_key_and_sas() {
        let store = HttpBlobStore::new(
            "https://acct.example.net/".to_string(),
            "raw-documents",
            "?sv=2022&sig=abc".to_string(),
        );
        assert_eq!(
            store.object_url("b66e.pdf"),
            "https://acct.example.net/raw-documents/b66e.pdf?sv=2022&sig=abc"
        );
    }

    #[test]
    fn listing_names_are_extracted_from_xml() {
        let xml = "<EnumerationResults><Blobs>\
                   <Blob><Name>aa.pdf</Name></Blob>\
                   <Blob><Name>bb.png</Name></Blob>\
                   </Blobs></EnumerationResults>";
        let names: Vec<String> = BLOB_NAME_RE
            .captures_iter(xml)
            .map(|cap| cap[1].to_string())
            .collect();
        assert_eq!(names, vec!["aa.pdf", "bb.png"]);
    }
}
