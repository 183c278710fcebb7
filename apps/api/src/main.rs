mod config;
mod db;
mod documents;
mod errors;
mod matching;
mod models;
mod routes;
mod state;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::connect_job_db;
use crate::matching::MatchService;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{CvStore, FsCvStore, FsJobStore, JobStore, PgJobStore, RemoteObjectStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CVScan API v{}", env!("CARGO_PKG_VERSION"));

    let cv_store: Arc<dyn CvStore> = Arc::new(FsCvStore::new(&config.upload_dir));
    info!("CV uploads stored under {}", config.upload_dir.display());

    // Job backend is fixed for the process lifetime.
    let job_store: Arc<dyn JobStore> = match &config.database_url {
        Some(url) => Arc::new(PgJobStore::new(connect_job_db(url).await?)),
        None => {
            info!("DATABASE_URL not set; job records stored under {}", config.jobs_dir.display());
            Arc::new(FsJobStore::new(&config.jobs_dir))
        }
    };

    let remote = match &config.supabase_url {
        Some(url) => {
            let remote =
                RemoteObjectStore::new(url, &config.supabase_bucket, config.remote_timeout)?;
            info!(
                "Remote CV fallback enabled (bucket: {}, timeout: {:?})",
                config.supabase_bucket, config.remote_timeout
            );
            Some(remote)
        }
        None => {
            warn!("SUPABASE_URL not set; CVs missing locally will not be fetched remotely");
            None
        }
    };

    let matcher = MatchService::new(
        cv_store.clone(),
        job_store.clone(),
        remote,
        config.remote_timeout,
    );

    let state = AppState {
        cv_store,
        job_store,
        matcher,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
