use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_BUCKET: &str = "cvscan-files";
const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 20;

/// Application configuration loaded from environment variables.
/// Nothing is strictly required: every collaborator has a local default.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory holding uploaded CV objects, keyed by file name.
    pub upload_dir: PathBuf,
    /// Directory holding `<job_id>.json` records when no database is configured.
    pub jobs_dir: PathBuf,
    /// When set, job records live in Postgres instead of `jobs_dir`.
    pub database_url: Option<String>,
    /// Public object-store base URL. Remote CV fetch is disabled without it.
    pub supabase_url: Option<String>,
    pub supabase_bucket: String,
    pub remote_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let remote_timeout_secs = match optional_env("REMOTE_FETCH_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("REMOTE_FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_REMOTE_TIMEOUT_SECS,
        };

        Ok(Config {
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            upload_dir: optional_env("UPLOAD_DIR")
                .unwrap_or_else(|| "uploads".to_string())
                .into(),
            jobs_dir: optional_env("JOBS_DIR")
                .unwrap_or_else(|| "jobs".to_string())
                .into(),
            database_url: optional_env("DATABASE_URL"),
            supabase_url: optional_env("SUPABASE_URL"),
            supabase_bucket: optional_env("SUPABASE_BUCKET")
                .unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            remote_timeout: Duration::from_secs(remote_timeout_secs),
        })
    }
}

/// Reads an env var, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
