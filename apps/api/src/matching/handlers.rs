//! Axum route handler for statistical matching.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::{AppError, AppJson};
use crate::matching::MatchResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchStatRequest {
    pub cv_filename: String,
    pub job_id: String,
}

/// POST /api/v1/match-stat
///
/// Scores a stored CV against a stored job. Returns `{score, details}`.
pub async fn handle_match_stat(
    State(state): State<AppState>,
    AppJson(request): AppJson<MatchStatRequest>,
) -> Result<Json<MatchResult>, AppError> {
    if request.cv_filename.trim().is_empty() {
        return Err(AppError::Validation("cv_filename cannot be empty".to_string()));
    }
    if request.job_id.trim().is_empty() {
        return Err(AppError::Validation("job_id cannot be empty".to_string()));
    }

    let result = state
        .matcher
        .match_stat(&request.cv_filename, &request.job_id)
        .await?;

    Ok(Json(result))
}
