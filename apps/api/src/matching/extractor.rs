//! CV text extraction: local store first, then the public remote store.
//!
//! Format is decided by the identifier's suffix, never by response headers:
//! `.pdf` goes through the PDF chain, everything else is decoded as text.

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use anyhow::anyhow;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::matching::MatchError;
use crate::storage::{CvStore, RemoteObjectStore};

/// Resolves a CV identifier to its text.
///
/// At most one local read or one remote GET is made. A local read that
/// outlives `io_timeout` is reported like a stalled remote (`Network`).
pub async fn extract_cv_text(
    identifier: &str,
    cv_store: &dyn CvStore,
    remote: Option<&RemoteObjectStore>,
    io_timeout: Duration,
) -> Result<String, MatchError> {
    let local = tokio::time::timeout(io_timeout, cv_store.get(identifier))
        .await
        .map_err(|_| MatchError::Network(format!("timed out reading CV '{identifier}'")))??;

    let content = match local {
        Some(content) => {
            debug!(identifier, "CV found in local storage");
            content
        }
        None => {
            let Some(remote) = remote else {
                return Err(MatchError::NotFound(format!(
                    "CV '{identifier}' not found locally and no remote storage is configured"
                )));
            };
            remote.fetch(identifier).await?
        }
    };

    Ok(text_from_bytes(identifier, content).await)
}

async fn text_from_bytes(identifier: &str, content: Bytes) -> String {
    if !is_pdf(identifier) {
        return decode_text(&content);
    }
    // Parsing is CPU-bound; keep it off the async workers.
    tokio::task::spawn_blocking(move || extract_pdf_text(&content))
        .await
        .unwrap_or_else(|e| {
            warn!("PDF extraction task failed: {e}");
            String::new()
        })
}

fn is_pdf(identifier: &str) -> bool {
    identifier.to_ascii_lowercase().ends_with(".pdf")
}

/// Decodes bytes as UTF-8, falling back to Latin-1 when they are not valid UTF-8.
///
/// Lossy: Latin-1 maps every byte to a char, so arbitrary binary content
/// "decodes" successfully into noise.
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Best-effort PDF text. Tries `pdf-extract`, then `lopdf`'s per-page
/// extraction; returns an empty string when both fail.
pub fn extract_pdf_text(bytes: &[u8]) -> String {
    match guarded("pdf-extract", || {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| anyhow!("{e}"))
    }) {
        Ok(text) => return text,
        Err(e) => warn!("Primary PDF extraction failed, trying lopdf: {e}"),
    }

    match guarded("lopdf", || extract_with_lopdf(bytes)) {
        Ok(text) => text,
        Err(e) => {
            warn!("Fallback PDF extraction failed, using empty text: {e}");
            String::new()
        }
    }
}

fn extract_with_lopdf(bytes: &[u8]) -> anyhow::Result<String> {
    let doc = lopdf::Document::load_mem(bytes)?;
    let pages = doc
        .get_pages()
        .into_keys()
        .map(|page| doc.extract_text(&[page]))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(pages.join("\n"))
}

/// Runs a PDF backend, turning a panic inside it into an error.
fn guarded<F>(backend: &str, f: F) -> anyhow::Result<String>
where
    F: FnOnce() -> anyhow::Result<String>,
{
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|_| Err(anyhow!("{backend} panicked while parsing")))
}
