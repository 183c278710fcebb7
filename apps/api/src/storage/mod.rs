//! Storage collaborators: where CV objects and job records live.
//!
//! The matching pipeline only ever reads through these traits. Concrete
//! backends are picked once at startup and carried in `AppState` as
//! `Arc<dyn CvStore>` / `Arc<dyn JobStore>`.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

use crate::models::job::NewJob;

pub mod local;
pub mod postgres;
pub mod remote;

pub use local::{FsCvStore, FsJobStore};
pub use postgres::PgJobStore;
pub use remote::RemoteObjectStore;

/// Local CV object storage, keyed by file name.
#[async_trait]
pub trait CvStore: Send + Sync {
    /// Returns the object's bytes, or `None` when no object exists under `key`.
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    async fn put(&self, key: &str, content: Bytes) -> Result<()>;
}

/// Job record storage.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Returns the raw serialized record for `job_id`, or `None` when absent.
    /// Decoding and parsing are left to the caller so malformed records
    /// surface as such.
    async fn fetch_record(&self, job_id: &str) -> Result<Option<Bytes>>;

    /// Persists a new job and returns its generated id.
    async fn insert(&self, job: &NewJob) -> Result<String>;
}

/// A storage key must be a single plain path component.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains(['/', '\\'])
        && !key.contains('\0')
}
