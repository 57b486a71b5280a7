use std::env;
use std::path::PathBuf;

use crate::common::error::{Result, VigilError};

/// Where the raw-artifact blob container lives. Chosen from the environment:
/// a remote blob endpoint when `STORAGE_ENDPOINT`/`STORAGE_SAS_TOKEN` are set,
/// otherwise a local directory rooted at `VIGIL_DATA_ROOT`.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Http { endpoint: String, sas_token: String },
    Fs { root: PathBuf },
}

impl StorageConfig {
    pub fn from_env() -> Result<Self> {
        if let (Ok(endpoint), Ok(sas_token)) =
            (env::var("STORAGE_ENDPOINT"), env::var("STORAGE_SAS_TOKEN"))
        {
            return Ok(StorageConfig::Http { endpoint, sas_token });
        }
        if let Ok(root) = env::var("VIGIL_DATA_ROOT") {
            return Ok(StorageConfig::Fs { root: PathBuf::from(root) });
        }
        Err(VigilError::Config {
            message: "set STORAGE_ENDPOINT and STORAGE_SAS_TOKEN for remote storage, \
                      or VIGIL_DATA_ROOT for a local store"
                .to_string(),
        })
    }
}

/// Connection settings for the search-index collaborator.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub endpoint: String,
    pub api_key: String,
    pub index_name: String,
}

impl SearchConfig {
    pub fn from_env() -> Result<Self> {
        Ok(SearchConfig {
            endpoint: required_var("SEARCH_ENDPOINT")?,
            api_key: required_var("SEARCH_API_KEY")?,
            index_name: required_var("SEARCH_INDEX_NAME")?,
        })
    }
}

/// Everything the submission gate needs, validated once at process start.
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub storage: StorageConfig,
    pub search: SearchConfig,
    pub raw_container: String,
}

impl GateConfig {
    pub fn from_env() -> Result<Self> {
        Ok(GateConfig {
            storage: StorageConfig::from_env()?,
            search: SearchConfig::from_env()?,
            raw_container: env::var("STORAGE_RAW_CONTAINER")
                .unwrap_or_else(|_| "raw-documents".to_string()),
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| VigilError::Config {
        message: format!("missing required environment variable {}", name),
    })
}
