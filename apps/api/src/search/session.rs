//! Job board and search sessions, the presentation contract over the core.
//!
//! `JobBoard` is built once per process: the dataset plus its derived options.
//! A `SearchSession` owns one interaction state and the result set it implies,
//! re-filtering only when the committed criteria actually change.

use std::sync::Arc;

use tracing::debug;

use crate::dataset::Dataset;
use crate::models::JobPosting;
use crate::search::filter::matching_indices;
use crate::search::interaction::{Action, InteractionState, TransitionError};
use crate::search::options::{derive_options, FilterOptions};

#[derive(Debug)]
pub struct JobBoard {
    dataset: Dataset,
    options: FilterOptions,
}

impl JobBoard {
    pub fn new(dataset: Dataset) -> Self {
        let options = derive_options(dataset.postings());
        Self { dataset, options }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn posting(&self, id: i64) -> Option<&JobPosting> {
        self.dataset.get(id)
    }
}

#[derive(Debug)]
pub struct SearchSession {
    board: Arc<JobBoard>,
    state: InteractionState,
    /// Dataset positions matching `state.criteria()`.
    results: Vec<usize>,
}

impl SearchSession {
    pub fn new(board: Arc<JobBoard>) -> Self {
        let state = InteractionState::new();
        let results = matching_indices(board.dataset().postings(), state.criteria());
        Self {
            board,
            state,
            results,
        }
    }

    pub fn results(&self) -> Vec<&JobPosting> {
        let postings = self.board.dataset().postings();
        self.results.iter().map(|&i| &postings[i]).collect()
    }

    pub fn selected(&self) -> Option<&JobPosting> {
        self.state
            .selected_id()
            .and_then(|id| self.board.posting(id))
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> Result<(), TransitionError> {
        debug!(?action, "dispatch");
        let refilter = action.touches_criteria();
        let before = refilter.then(|| self.state.criteria().clone());

        self.state.apply(action, self.board.dataset())?;

        if before.is_some_and(|prev| &prev != self.state.criteria()) {
            self.results = matching_indices(self.board.dataset().postings(), self.state.criteria());
            debug!(
                matches = self.results.len(),
                unfiltered = self.state.criteria().is_empty(),
                "results recomputed"
            );
        }
        Ok(())
    }
}
