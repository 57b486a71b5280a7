use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::common::error::{Result, VigilError};
use crate::ports::BlobStore;

const META_SUFFIX: &str = ".meta.json";

/// Directory-backed stand-in for the remote blob collaborator, used for
/// local development and tests. Metadata lives in a `<key>.meta.json`
/// sidecar next to each object.
pub struct FsBlobStore {
    container_dir: PathBuf,
}

impl FsBlobStore {
    pub fn new<P: AsRef<Path>>(root: P, container: &str) -> Self {
        let container_dir = root.as_ref().join(container);
        let _ = fs::create_dir_all(&container_dir);
        Self { container_dir }
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.container_dir.join(key)
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        metadata: &HashMap<String, String>,
        overwrite: bool,
    ) -> Result<()> {
        let path = self.object_path(key);
        if !overwrite && path.exists() {
            return Err(VigilError::Collaborator {
                message: format!("blob {} already exists and overwrite is disabled", key),
            });
        }
        fs::write(&path, bytes)?;
        if !metadata.is_empty() {
            let sidecar = self.container_dir.join(format!("{}{}", key, META_SUFFIX));
            fs::write(sidecar, serde_json::to_vec(metadata)?)?;
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.object_path(key))?)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        for path in [
            self.object_path(key),
            self.container_dir.join(format!("{}{}", key, META_SUFFIX)),
        ] {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.container_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(META_SUFFIX) {
                continue;
            }
            if name.starts_with(prefix) {
                keys.push(name);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn meta(filename: &str) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("original_filename".to_string(), filename.to_string());
        map
    }

    #[tokio::test]
    async fn put_get_roundtrip_with_metadata_sidecar() {
        let dir = tempdir().unwrap();
        let store = FsBlobStore::new(dir.path(), "raw");

        store
            .put("abc123.pdf", b"content", &meta("invoice.pdf"), true)
            .await
            .unwrap();

        assert_eq!(store.get("abc123.pdf").await.unwrap(), b"content");
        let sidecar = dir.path().join("raw/abc123.pdf.meta.json");
        let stored: HashMap<String, String> =
            serde_json::from_slice(&fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(stored["original_filename"], "invoice.pdf");
    }

    #[tokio::test]
    async fn overwrite_same_key_replaces_content() {
        let dir = tempdir().unwrap();
        let store = FsBlobStore::new(dir.path(), "raw");

        store.put("k", b"first", &HashMap::new(), true).await.unwrap();
        store.put("k", b"second", &HashMap::new(), true).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), b"second");
        assert_eq!(store.list("").await.unwrap(), vec!["k".to_string()]);
    }

    #[tokio::test]
    async fn put_without_overwrite_refuses_existing_key() {
        let dir = tempdir().unwrap();
        let store = FsBlobStore::new(dir.path(), "raw");

        store.put("k", b"first", &HashMap::new(), true).await.unwrap();
        let err = store.put("k", b"second", &HashMap::new(), false).await;
        assert!(err.is_err());
        assert_eq!(store.get("k").await.unwrap(), b"first");
    }

    #[tokio::test]
    async fn delete_absent_key_succeeds() {
        let dir = tempdir().unwrap();
        let store = FsBlobStore::new(dir.path(), "raw");
        store.delete("never-written").await.unwrap();
    }

    #[tokio::test]
    async fn list_skips_metadata_sidecars_and_honors_prefix() {
        let dir = tempdir().unwrap();
        let store = FsBlobStore::new(dir.path(), "raw");

        store.put("aa.pdf", b"1", &meta("a.pdf"), true).await.unwrap();
        store.put("ab.png", b"2", &HashMap::new(), true).await.unwrap();
        store.put("zz.jpg", b"3", &HashMap::new(), true).await.unwrap();

        assert_eq!(
            store.list("a").await.unwrap(),
            vec!["aa.pdf".to_string(), "ab.png".to_string()]
        );
        assert_eq!(store.list("").await.unwrap().len(), 3);
    }
}
