use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::matching::extractor::extract_cv_text;
use crate::matching::job_loader::load_job_text;
use crate::matching::scorer::{compute_match_score, MatchResult, DEFAULT_TOP_N};
use crate::matching::MatchError;
use crate::storage::{CvStore, JobStore, RemoteObjectStore};

/// Runs the match pipeline: CV text + job text → overlap score.
///
/// Built once at startup and shared through `AppState`; holds no state
/// between calls beyond its collaborators.
#[derive(Clone)]
pub struct MatchService {
    cv_store: Arc<dyn CvStore>,
    job_store: Arc<dyn JobStore>,
    remote: Option<RemoteObjectStore>,
    io_timeout: Duration,
}

impl MatchService {
    pub fn new(
        cv_store: Arc<dyn CvStore>,
        job_store: Arc<dyn JobStore>,
        remote: Option<RemoteObjectStore>,
        io_timeout: Duration,
    ) -> Self {
        Self {
            cv_store,
            job_store,
            remote,
            io_timeout,
        }
    }

    pub async fn match_stat(
        &self,
        cv_identifier: &str,
        job_id: &str,
    ) -> Result<MatchResult, MatchError> {
        // The two lookups share nothing, so resolve them side by side.
        let (cv_text, job_text) = tokio::try_join!(
            extract_cv_text(
                cv_identifier,
                self.cv_store.as_ref(),
                self.remote.as_ref(),
                self.io_timeout,
            ),
            load_job_text(job_id, self.job_store.as_ref()),
        )?;

        let result = compute_match_score(&cv_text, &job_text, DEFAULT_TOP_N);
        info!(
            cv = cv_identifier,
            job_id,
            score = result.score,
            n_common = result.details.n_common,
            "Computed statistical match"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FsCvStore, FsJobStore};
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        service: MatchService,
    }

    fn fixture(cv_files: &[(&str, &str)], jobs: &[(&str, &str)]) -> Fixture {
        let dir = TempDir::new().unwrap();
        let uploads = dir.path().join("uploads");
        let jobs_dir = dir.path().join("jobs");
        std::fs::create_dir_all(&uploads).unwrap();
        std::fs::create_dir_all(&jobs_dir).unwrap();
        for (name, content) in cv_files {
            std::fs::write(uploads.join(name), content).unwrap();
        }
        for (job_id, record) in jobs {
            std::fs::write(jobs_dir.join(format!("{job_id}.json")), record).unwrap();
        }

        let service = MatchService::new(
            Arc::new(FsCvStore::new(uploads)),
            Arc::new(FsJobStore::new(jobs_dir)),
            None,
            Duration::from_secs(5),
        );
        Fixture { _dir: dir, service }
    }

    #[tokio::test]
    async fn test_match_stat_end_to_end() {
        let f = fixture(
            &[(
                "cv.txt",
                "Experienced Python developer with Docker and FastAPI skills",
            )],
            &[(
                "job-1",
                r#"{"title": "Backend",
                    "description": "Looking for a Python developer with Docker experience"}"#,
            )],
        );

        let result = f.service.match_stat("cv.txt", "job-1").await.unwrap();
        assert_eq!(result.score, 0.81);
        assert_eq!(result.details.n_common, 3);
        assert_eq!(result.details.top_common.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_cv_propagates_not_found() {
        let f = fixture(&[], &[("job-1", r#"{"description": "Rust"}"#)]);
        let err = f.service.match_stat("ghost.pdf", "job-1").await.unwrap_err();
        assert!(matches!(err, MatchError::NotFound(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_missing_job_propagates_not_found() {
        let f = fixture(&[("cv.txt", "Rust")], &[]);
        let err = f.service.match_stat("cv.txt", "job-404").await.unwrap_err();
        assert!(matches!(err, MatchError::NotFound(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_malformed_job_propagates_parse_error() {
        let f = fixture(&[("cv.txt", "Rust")], &[("job-1", "not json at all")]);
        let err = f.service.match_stat("cv.txt", "job-1").await.unwrap_err();
        assert!(matches!(err, MatchError::Parse(_)), "got {err:?}");
    }
}
