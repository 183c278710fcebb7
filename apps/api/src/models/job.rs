use serde::{Deserialize, Serialize};

/// A job description as submitted for storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub description: String,
}
