use std::sync::Arc;

use crate::matching::MatchService;
use crate::storage::{CvStore, JobStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Local CV objects. Uploads write here; matching reads here first.
    pub cv_store: Arc<dyn CvStore>,
    /// Filesystem or Postgres, picked at startup from `DATABASE_URL`.
    pub job_store: Arc<dyn JobStore>,
    pub matcher: MatchService,
}
