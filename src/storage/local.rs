//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── config.toml           # Configuration
//! └── scraped_jobs.json     # Record collection (written atomically)
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::RawJob;
use crate::storage::{JobStorage, WriteMetadata};

/// Default record collection file name.
pub const DEFAULT_JOBS_FILE: &str = "scraped_jobs.json";

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    jobs_file: String,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self::with_jobs_file(root_dir, DEFAULT_JOBS_FILE)
    }

    /// Create a LocalStorage with a custom collection file name.
    pub fn with_jobs_file(root_dir: impl Into<PathBuf>, jobs_file: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            jobs_file: jobs_file.into(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Read a batch file of raw records from anywhere on disk.
    pub async fn read_batch(path: impl Into<PathBuf>) -> Result<Vec<RawJob>> {
        let path = path.into();
        let bytes = tokio::fs::read(&path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl JobStorage for LocalStorage {
    async fn read_records(&self) -> Result<Option<Vec<RawJob>>> {
        self.read_json(&self.jobs_file).await
    }

    async fn write_records(&self, records: &[RawJob]) -> Result<WriteMetadata> {
        self.write_json(&self.jobs_file, records).await?;
        log::info!(
            "Wrote {} records to {}",
            records.len(),
            self.path(&self.jobs_file).display()
        );

        Ok(WriteMetadata {
            count: records.len(),
            location: self.location(),
            timestamp: Utc::now(),
        })
    }

    fn location(&self) -> String {
        self.path(&self.jobs_file).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(title: &str) -> RawJob {
        let mut raw = RawJob::new();
        raw.insert("title".to_string(), json!(title));
        raw.insert("source".to_string(), json!("Guru"));
        raw
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.write_bytes("test.txt", b"hello").await.unwrap();
        let data = storage.read_bytes("test.txt").await.unwrap();
        assert_eq!(data, Some(b"hello".to_vec()));
    }

    #[tokio::test]
    async fn test_read_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        assert!(storage.read_bytes("nope.txt").await.unwrap().is_none());
        assert!(storage.read_records().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_records_round_trip() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::with_jobs_file(tmp.path().join("nested"), "jobs.json");

        let records = vec![record("First"), record("Second")];
        let meta = storage.write_records(&records).await.unwrap();
        assert_eq!(meta.count, 2);
        assert!(meta.location.ends_with("jobs.json"));
        assert!(!tmp.path().join("nested/jobs.tmp").exists());

        let loaded = storage.read_records().await.unwrap().unwrap();
        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn test_malformed_content_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage
            .write_bytes(DEFAULT_JOBS_FILE, b"{\"not\": \"an array\"}")
            .await
            .unwrap();
        assert!(storage.read_records().await.is_err());

        storage
            .write_bytes(DEFAULT_JOBS_FILE, b"[{\"title\": \"ok\"}, 42]")
            .await
            .unwrap();
        assert!(storage.read_records().await.is_err());
    }

    #[tokio::test]
    async fn test_read_batch() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("batch.json");
        std::fs::write(&path, r#"[{"title": "A"}, {"title": "B", "source": "Guru"}]"#).unwrap();

        let batch = LocalStorage::read_batch(&path).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1]["source"], "Guru");
    }
}
