// Statistical CV ↔ job matching. No model calls: text is resolved from
// storage, tokenized, and scored by vocabulary overlap.

use thiserror::Error;

pub mod extractor;
pub mod handlers;
pub mod job_loader;
pub mod scorer;
pub mod service;
pub mod tokenizer;

pub use scorer::MatchResult;
pub use service::MatchService;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("{0}")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
