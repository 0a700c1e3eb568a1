//! Dataset: the fixed, ordered set of postings the board serves.
//!
//! Records are validated once here. Malformed ones are logged and kept aside
//! in `rejected`; they never reach option derivation or filtering.

pub mod source;

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::models::{InvalidRecord, JobPosting, RawPosting};

pub use source::{source_for, PostingSource};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset is not a JSON array of postings: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Default)]
pub struct Dataset {
    postings: Vec<JobPosting>,
    rejected: Vec<InvalidRecord>,
}

impl Dataset {
    /// Reads each JSON record on its own, then validates in order.
    pub fn from_values(values: Vec<Value>) -> Self {
        Self::validate(values.into_iter().enumerate().map(|(index, value)| {
            serde_json::from_value::<RawPosting>(value).map_err(|e| InvalidRecord::Malformed {
                index,
                reason: e.to_string(),
            })
        }))
    }

    #[cfg(test)]
    pub(crate) fn from_records(records: Vec<RawPosting>) -> Self {
        Self::validate(records.into_iter().map(Ok))
    }

    /// The first occurrence of an id wins.
    fn validate(records: impl Iterator<Item = Result<RawPosting, InvalidRecord>>) -> Self {
        let mut postings = Vec::new();
        let mut rejected = Vec::new();
        let mut seen = HashSet::new();

        for record in records {
            let result = record.and_then(JobPosting::try_from).and_then(|posting| {
                if seen.insert(posting.id) {
                    Ok(posting)
                } else {
                    Err(InvalidRecord::DuplicateId { id: posting.id })
                }
            });

            match result {
                Ok(posting) => postings.push(posting),
                Err(e) => {
                    warn!("Skipping posting: {e}");
                    rejected.push(e);
                }
            }
        }

        Dataset { postings, rejected }
    }

    pub async fn load(source: &dyn PostingSource) -> Result<Self, DatasetError> {
        let values = source.load().await?;
        Ok(Self::from_values(values))
    }

    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    pub fn get(&self, id: i64) -> Option<&JobPosting> {
        self.postings.iter().find(|p| p.id == id)
    }

    pub fn rejected(&self) -> &[InvalidRecord] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}
