//! Posting sources: where the raw records for a dataset come from.
//!
//! `AppState` never sees a source; `main` picks one from config, loads it once
//! and hands the resulting `Dataset` to the board.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::dataset::DatasetError;

const SAMPLE_JOBS_JSON: &str = include_str!("../../data/sample_jobs.json");

/// Anything that can produce an ordered list of posting records.
///
/// Records come back as untyped JSON so that a single wrong-typed record is
/// rejected by `Dataset::load` on its own instead of failing the whole array.
#[async_trait]
pub trait PostingSource: Send + Sync {
    async fn load(&self) -> Result<Vec<Value>, DatasetError>;

    /// Human-readable origin, used in startup logs.
    fn describe(&self) -> String;
}

/// The eight sample postings compiled into the binary.
pub struct EmbeddedSource;

#[async_trait]
impl PostingSource for EmbeddedSource {
    async fn load(&self) -> Result<Vec<Value>, DatasetError> {
        parse_records(SAMPLE_JOBS_JSON)
    }

    fn describe(&self) -> String {
        "embedded sample dataset".to_string()
    }
}

/// A JSON array of postings on disk.
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PostingSource for FileSource {
    async fn load(&self) -> Result<Vec<Value>, DatasetError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| DatasetError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        parse_records(&text)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Builds the source named by config: a file when a path is set, else the embedded sample.
pub fn source_for(path: Option<&str>) -> Box<dyn PostingSource> {
    match path {
        Some(p) => Box::new(FileSource::new(p)),
        None => Box::new(EmbeddedSource),
    }
}

fn parse_records(text: &str) -> Result<Vec<Value>, DatasetError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn test_embedded_source_has_eight_postings() {
        let records = EmbeddedSource.load().await.unwrap();
        assert_eq!(records.len(), 8);
        let ids: Vec<i64> = records.iter().filter_map(|r| r["id"].as_i64()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[tokio::test]
    async fn test_file_source_reads_json_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r##"[{{"id": 42, "title": "Rust Engineer", "company": "Ferrous Ltd",
                 "location": null, "salary_min": null, "salary_max": null,
                 "tags": "Rust, Tokio", "url": "#", "description": "Systems work."}}]"##
        )
        .unwrap();

        let source = FileSource::new(file.path());
        let records = source.load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], 42);
        assert_eq!(records[0]["tags"], "Rust, Tokio");
    }

    #[tokio::test]
    async fn test_file_source_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("nope.json"));
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[tokio::test]
    async fn test_file_source_rejects_non_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"id": 1}}"#).unwrap();
        let err = FileSource::new(file.path()).load().await.unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }

    #[test]
    fn test_source_for_picks_file_when_path_set() {
        assert_eq!(source_for(None).describe(), "embedded sample dataset");
        assert_eq!(source_for(Some("/tmp/jobs.json")).describe(), "file /tmp/jobs.json");
    }
}
