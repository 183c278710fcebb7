use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const JOBS_SCHEMA: &str = include_str!("../migrations/0001_create_jobs.sql");

/// Connects to Postgres and makes sure the `jobs` table exists.
pub async fn connect_job_db(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    // Single idempotent statement (CREATE TABLE IF NOT EXISTS).
    sqlx::query(JOBS_SCHEMA)
        .execute(&pool)
        .await
        .context("Failed to apply jobs schema")?;

    info!("PostgreSQL connection pool established, jobs schema ready");
    Ok(pool)
}
