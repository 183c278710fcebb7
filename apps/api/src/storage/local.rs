use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::info;
use uuid::Uuid;

use crate::models::job::NewJob;
use crate::storage::{is_valid_key, CvStore, JobStore};

/// CV objects stored as plain files under a single directory.
#[derive(Debug, Clone)]
pub struct FsCvStore {
    root: PathBuf,
}

impl FsCvStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl CvStore for FsCvStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        if !is_valid_key(key) {
            return Ok(None);
        }
        read_optional(self.root.join(key)).await
    }

    async fn put(&self, key: &str, content: Bytes) -> Result<()> {
        if !is_valid_key(key) {
            bail!("invalid CV object key {key:?}");
        }
        fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("creating upload directory {}", self.root.display()))?;
        fs::write(self.root.join(key), &content)
            .await
            .with_context(|| format!("writing CV object {key:?}"))?;
        info!(key, bytes = content.len(), "Stored CV object");
        Ok(())
    }
}

/// Job records stored as `<job_id>.json` files under a single directory.
#[derive(Debug, Clone)]
pub struct FsJobStore {
    root: PathBuf,
}

impl FsJobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl JobStore for FsJobStore {
    async fn fetch_record(&self, job_id: &str) -> Result<Option<Bytes>> {
        if !is_valid_key(job_id) {
            return Ok(None);
        }
        read_optional(self.root.join(format!("{job_id}.json"))).await
    }

    async fn insert(&self, job: &NewJob) -> Result<String> {
        let job_id = Uuid::new_v4().to_string();
        fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("creating jobs directory {}", self.root.display()))?;
        let body = serde_json::to_vec_pretty(job)?;
        fs::write(self.root.join(format!("{job_id}.json")), body)
            .await
            .with_context(|| format!("writing job record {job_id}"))?;
        info!(job_id, "Stored job record");
        Ok(job_id)
    }
}

async fn read_optional(path: PathBuf) -> Result<Option<Bytes>> {
    match fs::read(&path).await {
        Ok(content) => Ok(Some(Bytes::from(content))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_cv_put_then_get() {
        let dir = TempDir::new().unwrap();
        let store = FsCvStore::new(dir.path().join("uploads"));

        store
            .put("cv.txt", Bytes::from_static(b"Rust engineer"))
            .await
            .unwrap();

        let got = store.get("cv.txt").await.unwrap();
        assert_eq!(got.as_deref(), Some(&b"Rust engineer"[..]));
    }

    #[tokio::test]
    async fn test_cv_missing_object_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FsCvStore::new(dir.path());
        assert!(store.get("absent.pdf").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cv_traversal_key_is_none_and_put_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("secret.txt"), "top secret").unwrap();
        let store = FsCvStore::new(dir.path().join("uploads"));

        assert!(store.get("../secret.txt").await.unwrap().is_none());
        assert!(store
            .put("../escape.txt", Bytes::from_static(b"x"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_job_insert_then_fetch_record() {
        let dir = TempDir::new().unwrap();
        let store = FsJobStore::new(dir.path());
        let job = NewJob {
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            description: "Rust and Postgres".to_string(),
        };

        let job_id = store.insert(&job).await.unwrap();
        let raw = store.fetch_record(&job_id).await.unwrap().unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&raw).unwrap();

        assert_eq!(parsed["description"], "Rust and Postgres");
        assert_eq!(parsed["company"], "Acme");
    }

    #[tokio::test]
    async fn test_job_missing_record_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FsJobStore::new(dir.path());
        assert!(store.fetch_record("nope").await.unwrap().is_none());
    }
}
