//! Axum route handlers for CV and job intake.

use std::path::Path;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::errors::{AppError, AppJson};
use crate::models::job::NewJob;
use crate::state::AppState;
use crate::storage::is_valid_key;

const ALLOWED_CV_EXTENSIONS: [&str; 2] = [".pdf", ".txt"];

#[derive(Debug, Serialize)]
pub struct UploadCvResponse {
    pub status: &'static str,
    pub filename: String,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CreateJobResponse {
    pub status: &'static str,
    pub job_id: String,
    pub message: &'static str,
}

/// POST /api/v1/upload-cv
///
/// Multipart upload; the `file` field is stored under its own file name.
/// Only PDF and plain-text CVs are accepted.
pub async fn handle_upload_cv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadCvResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .and_then(sanitize_filename)
            .ok_or_else(|| AppError::Validation("A valid file name is required".to_string()))?;
        if !has_allowed_extension(&filename) {
            return Err(AppError::Validation(
                "Only PDF or TXT files are allowed".to_string(),
            ));
        }

        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        state.cv_store.put(&filename, content).await?;

        return Ok(Json(UploadCvResponse {
            status: "success",
            filename,
            message: "CV uploaded successfully",
        }));
    }

    Err(AppError::Validation("Missing 'file' field".to_string()))
}

/// POST /api/v1/job
///
/// Stores a job description and returns its generated id.
pub async fn handle_create_job(
    State(state): State<AppState>,
    AppJson(job): AppJson<NewJob>,
) -> Result<Json<CreateJobResponse>, AppError> {
    for (field, value) in [
        ("title", &job.title),
        ("company", &job.company),
        ("description", &job.description),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} cannot be empty")));
        }
    }

    let job_id = state.job_store.insert(&job).await?;

    Ok(Json(CreateJobResponse {
        status: "success",
        job_id,
        message: "Job description stored successfully",
    }))
}

/// Reduces a client-supplied name to its final path component.
fn sanitize_filename(raw: &str) -> Option<String> {
    let name = Path::new(raw).file_name()?.to_str()?;
    is_valid_key(name).then(|| name.to_string())
}

fn has_allowed_extension(filename: &str) -> bool {
    let lower = filename.to_ascii_lowercase();
    ALLOWED_CV_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_strips_directories() {
        assert_eq!(sanitize_filename("cv.pdf").as_deref(), Some("cv.pdf"));
        assert_eq!(sanitize_filename("/tmp/x/cv.pdf").as_deref(), Some("cv.pdf"));
        assert_eq!(sanitize_filename("../../cv.txt").as_deref(), Some("cv.txt"));
        assert_eq!(sanitize_filename(".."), None);
        assert_eq!(sanitize_filename(""), None);
    }

    #[test]
    fn test_allowed_extensions() {
        assert!(has_allowed_extension("cv.pdf"));
        assert!(has_allowed_extension("CV.TXT"));
        assert!(!has_allowed_extension("cv.docx"));
        assert!(!has_allowed_extension("pdf"));
    }
}
