use serde_json::Value;

use crate::matching::MatchError;
use crate::storage::JobStore;

/// Record fields that may carry the job's text, in priority order.
const TEXT_FIELDS: [&str; 3] = ["description", "text", "content"];

/// Resolves a job id to its descriptive text.
pub async fn load_job_text(job_id: &str, store: &dyn JobStore) -> Result<String, MatchError> {
    let raw = store
        .fetch_record(job_id)
        .await?
        .ok_or_else(|| MatchError::NotFound(format!("Job '{job_id}' not found")))?;
    let raw = std::str::from_utf8(&raw)
        .map_err(|e| MatchError::Parse(format!("job record '{job_id}' is not UTF-8: {e}")))?;
    job_text_from_record(raw)
}

/// Picks the first non-blank text field of a JSON record. Records with no
/// such field are returned serialized whole, so any well-formed record
/// yields some text.
pub fn job_text_from_record(raw: &str) -> Result<String, MatchError> {
    let record: Value = serde_json::from_str(raw)
        .map_err(|e| MatchError::Parse(format!("invalid job record: {e}")))?;

    let field = TEXT_FIELDS
        .iter()
        .filter_map(|key| record.get(key).and_then(Value::as_str))
        .find(|text| !text.trim().is_empty());

    Ok(match field {
        Some(text) => text.to_string(),
        None => record.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::NewJob;
    use crate::storage::FsJobStore;
    use tempfile::TempDir;

    #[test]
    fn test_description_returned_verbatim() {
        let text = job_text_from_record(r#"{"description": "Senior Engineer role"}"#).unwrap();
        assert_eq!(text, "Senior Engineer role");
    }

    #[test]
    fn test_field_priority() {
        let text = job_text_from_record(
            r#"{"content": "third", "text": "second", "description": "first"}"#,
        )
        .unwrap();
        assert_eq!(text, "first");

        let text = job_text_from_record(r#"{"content": "third", "text": "second"}"#).unwrap();
        assert_eq!(text, "second");
    }

    #[test]
    fn test_blank_and_non_string_fields_are_skipped() {
        let text = job_text_from_record(
            r#"{"description": "   ", "text": 42, "content": "Rust backend work"}"#,
        )
        .unwrap();
        assert_eq!(text, "Rust backend work");
    }

    #[test]
    fn test_record_without_text_fields_is_serialized() {
        let raw = r#"{"title": "Data Engineer", "company": "Acme"}"#;
        let text = job_text_from_record(raw).unwrap();
        assert!(text.contains("Data Engineer"));
        assert!(text.contains("Acme"));
    }

    #[test]
    fn test_non_object_record_is_serialized() {
        let text = job_text_from_record(r#"["spark", "airflow"]"#).unwrap();
        assert_eq!(text, r#"["spark","airflow"]"#);
    }

    #[test]
    fn test_malformed_record_is_parse_error() {
        let err = job_text_from_record("{not json").unwrap_err();
        assert!(matches!(err, MatchError::Parse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_load_from_store() {
        let dir = TempDir::new().unwrap();
        let store = FsJobStore::new(dir.path());
        let job_id = store
            .insert(&NewJob {
                title: "Platform Engineer".to_string(),
                company: "Acme".to_string(),
                description: "Senior Engineer role".to_string(),
            })
            .await
            .unwrap();

        let text = load_job_text(&job_id, &store).await.unwrap();
        assert_eq!(text, "Senior Engineer role");
    }

    #[tokio::test]
    async fn test_missing_job_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = FsJobStore::new(dir.path());
        let err = load_job_text("does-not-exist", &store).await.unwrap_err();
        assert!(matches!(err, MatchError::NotFound(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_corrupt_job_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{\"description\": ").unwrap();
        let store = FsJobStore::new(dir.path());
        let err = load_job_text("broken", &store).await.unwrap_err();
        assert!(matches!(err, MatchError::Parse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_non_utf8_job_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        // Latin-1 "Ingénieur": valid JSON shape, invalid UTF-8.
        let raw: &[u8] = b"{\"description\": \"Ing\xe9nieur\"}";
        std::fs::write(dir.path().join("latin1.json"), raw).unwrap();
        let store = FsJobStore::new(dir.path());
        let err = load_job_text("latin1", &store).await.unwrap_err();
        assert!(matches!(err, MatchError::Parse(_)), "got {err:?}");
    }
}
