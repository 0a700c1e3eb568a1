//! Filter engine: conjunctive text / location / skill predicates over the dataset.
//!
//! Each predicate is disjunctive over its own selected values and an empty
//! predicate matches everything. Results keep dataset order; there is no scoring.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::JobPosting;

/// A complete set of filter predicates. Replaced wholesale, never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub locations: BTreeSet<String>,
    #[serde(default)]
    pub skills: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.locations.is_empty() && self.skills.is_empty()
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self
        }
    }

    pub fn with_locations<I, S>(self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            locations: locations.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_skills<I, S>(self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skills: skills.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn without_location(&self, location: &str) -> Self {
        let mut next = self.clone();
        next.locations.remove(location);
        next
    }

    pub fn without_skill(&self, skill: &str) -> Self {
        let mut next = self.clone();
        next.skills.remove(skill);
        next
    }
}

/// Returns the postings that satisfy every predicate, in dataset order.
pub fn apply_filters<'a>(postings: &'a [JobPosting], criteria: &FilterCriteria) -> Vec<&'a JobPosting> {
    matching_indices(postings, criteria)
        .into_iter()
        .map(|i| &postings[i])
        .collect()
}

/// Positions of the matching postings, ascending. Lets callers cache a result
/// set without holding borrows into the dataset.
pub fn matching_indices(postings: &[JobPosting], criteria: &FilterCriteria) -> Vec<usize> {
    let needle = criteria.text.to_lowercase();
    postings
        .iter()
        .enumerate()
        .filter(|(_, p)| matches_with_needle(criteria, &needle, p))
        .map(|(i, _)| i)
        .collect()
}

fn matches_with_needle(criteria: &FilterCriteria, needle: &str, posting: &JobPosting) -> bool {
    matches_text(needle, posting)
        && matches_location(&criteria.locations, posting)
        && matches_skills(&criteria.skills, posting)
}

fn matches_text(needle: &str, posting: &JobPosting) -> bool {
    needle.is_empty()
        || posting.title.to_lowercase().contains(needle)
        || posting.company.to_lowercase().contains(needle)
}

fn matches_location(locations: &BTreeSet<String>, posting: &JobPosting) -> bool {
    if locations.is_empty() {
        return true;
    }
    posting
        .location
        .as_ref()
        .is_some_and(|loc| locations.contains(loc))
}

fn matches_skills(skills: &BTreeSet<String>, posting: &JobPosting) -> bool {
    skills.is_empty() || posting.tags.iter().any(|t| skills.contains(t))
}
