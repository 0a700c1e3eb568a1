use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A posting exactly as it appears in a dataset file, before validation.
///
/// Every field other than `id` is optional here; `JobPosting::try_from`
/// decides what is usable. Records that do not even fit this shape are
/// rejected one at a time as `InvalidRecord::Malformed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPosting {
    pub id: i64,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub tags: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
}

/// Annual salary band in pounds. Both bounds are always present together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

/// A validated, immutable job posting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobPosting {
    pub id: i64,
    pub title: String,
    pub company: String,
    /// `None` means remote or unspecified.
    pub location: Option<String>,
    pub salary: Option<SalaryRange>,
    /// Trimmed skill tokens in the order they were listed.
    pub tags: Vec<String>,
    /// The comma-joined source string, kept for display.
    pub raw_tags: Option<String>,
    pub url: String,
    pub description: String,
}

/// A record that breaks the posting data contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidRecord {
    #[error("posting {id}: missing {field}")]
    MissingField { id: i64, field: &'static str },

    #[error("posting {id}: salary must have both bounds or neither")]
    PartialSalary { id: i64 },

    #[error("posting {id}: salary bounds must be non-negative")]
    NegativeSalary { id: i64 },

    #[error("posting {id}: salary_min {min} exceeds salary_max {max}")]
    InvertedSalary { id: i64, min: f64, max: f64 },

    #[error("posting {id}: tags '{raw}' contain no skill names")]
    EmptyTags { id: i64, raw: String },

    #[error("posting {id}: duplicate id")]
    DuplicateId { id: i64 },

    /// The record at `index` could not be read as a posting at all.
    #[error("record {index}: {reason}")]
    Malformed { index: usize, reason: String },
}

impl JobPosting {
    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }
}

impl TryFrom<RawPosting> for JobPosting {
    type Error = InvalidRecord;

    fn try_from(raw: RawPosting) -> Result<Self, Self::Error> {
        let id = raw.id;

        let title = required(raw.title, id, "title")?;
        let company = required(raw.company, id, "company")?;

        let salary = match (raw.salary_min, raw.salary_max) {
            (None, None) => None,
            (Some(min), Some(max)) => {
                if min < 0.0 || max < 0.0 {
                    return Err(InvalidRecord::NegativeSalary { id });
                }
                if min > max {
                    return Err(InvalidRecord::InvertedSalary { id, min, max });
                }
                Some(SalaryRange { min, max })
            }
            _ => return Err(InvalidRecord::PartialSalary { id }),
        };

        // A blank tag string carries no skills, same as an absent one.
        let raw_tags = raw.tags.filter(|t| !t.trim().is_empty());
        let tags = match raw_tags.as_deref() {
            Some(source) => {
                let tokens = split_tags(source);
                if tokens.is_empty() {
                    return Err(InvalidRecord::EmptyTags {
                        id,
                        raw: source.to_string(),
                    });
                }
                tokens
            }
            None => Vec::new(),
        };

        Ok(JobPosting {
            id,
            title,
            company,
            location: raw.location.filter(|l| !l.is_empty()),
            salary,
            tags,
            raw_tags,
            url: raw.url,
            description: raw.description,
        })
    }
}

/// Splits a comma-joined tag string into trimmed, non-empty tokens.
pub fn split_tags(source: &str) -> Vec<String> {
    source
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn required(value: Option<String>, id: i64, field: &'static str) -> Result<String, InvalidRecord> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(InvalidRecord::MissingField { id, field })
}
