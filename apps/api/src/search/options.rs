use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::JobPosting;

/// Choices offered by the location and skill pickers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub locations: Vec<String>,
    pub skills: Vec<String>,
}

/// Collects the distinct locations and skill tokens of a dataset, each sorted
/// ascending by codepoint. Single pass, no side effects.
pub fn derive_options(postings: &[JobPosting]) -> FilterOptions {
    let mut locations = BTreeSet::new();
    let mut skills = BTreeSet::new();

    for posting in postings {
        if let Some(location) = &posting.location {
            locations.insert(location.as_str());
        }
        for tag in &posting.tags {
            skills.insert(tag.as_str());
        }
    }

    FilterOptions {
        locations: locations.into_iter().map(str::to_string).collect(),
        skills: skills.into_iter().map(str::to_string).collect(),
    }
}
