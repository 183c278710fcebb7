//! Public object-store reads over plain HTTP.
//!
//! Objects are addressed as `{base}/storage/v1/object/public/{bucket}/{key}`.
//! No credentials are sent; the bucket must be public.

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use bytes::Bytes;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::matching::MatchError;

const USER_AGENT: &str = concat!("cvscan-match-stat/", env!("CARGO_PKG_VERSION"));
const PUBLIC_OBJECT_PREFIX: [&str; 4] = ["storage", "v1", "object", "public"];

#[derive(Clone)]
pub struct RemoteObjectStore {
    client: Client,
    base_url: Url,
    bucket: String,
}

impl RemoteObjectStore {
    pub fn new(base_url: &str, bucket: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid remote object store URL {base_url:?}"))?;
        if base_url.cannot_be_a_base() {
            bail!("Remote object store URL {base_url} cannot carry a path");
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client for remote object store")?;

        Ok(Self {
            client,
            base_url,
            bucket: bucket.trim_matches('/').to_string(),
        })
    }

    /// Builds the public URL for `key`. Each `/`-separated part of the key is
    /// percent-encoded as its own path segment, so `#`, `?` and spaces stay
    /// in the object name. Dot segments are refused as `NotFound`: they
    /// could only address something outside the bucket.
    pub fn public_url(&self, key: &str) -> Result<Url, MatchError> {
        let key_segments: Vec<&str> = key.trim_start_matches('/').split('/').collect();
        if key_segments.iter().any(|s| matches!(*s, "." | "..")) {
            return Err(MatchError::NotFound(format!(
                "CV '{key}' is not a valid object key"
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MatchError::Internal(anyhow!("remote base URL cannot carry a path")))?
            .pop_if_empty()
            .extend(PUBLIC_OBJECT_PREFIX)
            .extend(self.bucket.split('/'))
            .extend(key_segments);
        Ok(url)
    }

    /// Performs a single GET for `key`. No retries.
    ///
    /// HTTP error statuses mean the object is not there (`NotFound`);
    /// failing to talk to the server at all, timeouts included, is a
    /// `Network` error.
    pub async fn fetch(&self, key: &str) -> Result<Bytes, MatchError> {
        let url = self.public_url(key)?;
        debug!(%url, "Fetching CV from remote object store");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| MatchError::Network(format!("GET {url}: {e}")))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            warn!(%url, status = status.as_u16(), "Remote object store returned an error status");
            return Err(MatchError::NotFound(format!(
                "CV '{key}' not found in remote storage (HTTP {})",
                status.as_u16()
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| MatchError::Network(format!("reading body of {url}: {e}")))
    }
}
