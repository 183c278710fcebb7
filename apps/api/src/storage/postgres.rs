use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::job::NewJob;
use crate::storage::JobStore;

/// Job records kept in the `jobs` table (see `migrations/`).
#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn fetch_record(&self, job_id: &str) -> Result<Option<Bytes>> {
        // The whole row is handed back as JSON so the loader treats both
        // backends' records the same way.
        let record: Option<String> =
            sqlx::query_scalar("SELECT row_to_json(j)::text FROM jobs j WHERE j.job_id = $1")
                .bind(job_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(record.map(Bytes::from))
    }

    async fn insert(&self, job: &NewJob) -> Result<String> {
        let job_id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO jobs (job_id, title, company, description) VALUES ($1, $2, $3, $4)",
        )
        .bind(&job_id)
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.description)
        .execute(&self.pool)
        .await?;

        info!(job_id, "Inserted job record");
        Ok(job_id)
    }
}
