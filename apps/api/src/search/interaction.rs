//! Interaction state: draft inputs, committed criteria, and the detail selection.
//!
//! Draft and committed criteria are separate snapshots. Only `Commit`,
//! `ClearAll` and `RemoveCriterion` replace the committed one, and every
//! transition runs to completion before the next is applied.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::Dataset;
use crate::search::filter::FilterCriteria;

/// Which committed criterion a `RemoveCriterion` action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    Text,
    Location,
    Skill,
}

/// User actions consumed by the state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    EditText { text: String },
    SetLocations { locations: Vec<String> },
    SetSkills { skills: Vec<String> },
    ToggleLocation { location: String },
    ToggleSkill { skill: String },
    Commit,
    ClearAll,
    /// `value` names the location or skill to drop; ignored for `Text`.
    RemoveCriterion {
        kind: CriterionKind,
        #[serde(default)]
        value: Option<String>,
    },
    Select { job_id: i64 },
    CloseDetail,
}

impl Action {
    /// True for actions that can change the committed criteria.
    pub fn touches_criteria(&self) -> bool {
        matches!(
            self,
            Action::Commit | Action::ClearAll | Action::RemoveCriterion { .. }
        )
    }
}

/// Coarse phase of the session, derived from the state rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    ResultsDisplayed,
    DraftEditing,
    DetailOpen,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransitionError {
    #[error("posting {0} does not exist")]
    UnknownPosting(i64),

    #[error("remove_criterion for {kind:?} needs a value")]
    MissingValue { kind: CriterionKind },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InteractionState {
    draft: FilterCriteria,
    criteria: FilterCriteria,
    selected: Option<i64>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &FilterCriteria {
        &self.draft
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected
    }

    /// `DraftEditing` means the draft differs from what is committed, not that
    /// the user typed recently. Removing a chip leaves the draft alone, so the
    /// removed value stays pending there until the next commit or clear.
    pub fn phase(&self) -> Phase {
        if self.selected.is_some() {
            Phase::DetailOpen
        } else if self.draft != self.criteria {
            Phase::DraftEditing
        } else {
            Phase::ResultsDisplayed
        }
    }

    /// Applies one action. On error the state is left exactly as it was.
    pub fn apply(&mut self, action: Action, dataset: &Dataset) -> Result<(), TransitionError> {
        match action {
            Action::EditText { text } => self.draft = self.draft.clone().with_text(text),
            Action::SetLocations { locations } => {
                self.draft = self.draft.clone().with_locations(locations)
            }
            Action::SetSkills { skills } => self.draft = self.draft.clone().with_skills(skills),
            Action::ToggleLocation { location } => {
                let mut next = self.draft.clone();
                if !next.locations.remove(&location) {
                    next.locations.insert(location);
                }
                self.draft = next;
            }
            Action::ToggleSkill { skill } => {
                let mut next = self.draft.clone();
                if !next.skills.remove(&skill) {
                    next.skills.insert(skill);
                }
                self.draft = next;
            }
            Action::Commit => self.criteria = self.draft.clone(),
            Action::ClearAll => {
                self.draft = FilterCriteria::default();
                self.criteria = FilterCriteria::default();
            }
            Action::RemoveCriterion { kind, value } => {
                self.criteria = self.remove_criterion(kind, value.as_deref())?
            }
            Action::Select { job_id } => {
                if dataset.get(job_id).is_none() {
                    return Err(TransitionError::UnknownPosting(job_id));
                }
                self.selected = Some(job_id);
            }
            Action::CloseDetail => self.selected = None,
        }
        Ok(())
    }

    fn remove_criterion(
        &self,
        kind: CriterionKind,
        value: Option<&str>,
    ) -> Result<FilterCriteria, TransitionError> {
        let criteria = match (kind, value) {
            (CriterionKind::Text, _) => self.criteria.clone().with_text(""),
            (CriterionKind::Location, Some(v)) => self.criteria.without_location(v),
            (CriterionKind::Skill, Some(v)) => self.criteria.without_skill(v),
            (kind, None) => return Err(TransitionError::MissingValue { kind }),
        };
        Ok(criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::sample;

    fn edit_text(text: &str) -> Action {
        Action::EditText {
            text: text.to_string(),
        }
    }

    #[test]
    fn test_initial_state_shows_results() {
        let state = InteractionState::new();
        assert_eq!(state.phase(), Phase::ResultsDisplayed);
        assert!(state.criteria().is_empty());
        assert!(state.selected_id().is_none());
    }

    #[tokio::test]
    async fn test_draft_edits_do_not_touch_criteria() {
        let dataset = sample().await;
        let mut state = InteractionState::new();
        state.apply(edit_text("rust"), &dataset).unwrap();
        state
            .apply(
                Action::SetLocations {
                    locations: vec!["London, UK".into()],
                },
                &dataset,
            )
            .unwrap();

        assert_eq!(state.draft().text, "rust");
        assert!(state.criteria().is_empty());
        assert_eq!(state.phase(), Phase::DraftEditing);
    }

    #[tokio::test]
    async fn test_commit_copies_draft() {
        let dataset = sample().await;
        let mut state = InteractionState::new();
        state.apply(edit_text("javascript"), &dataset).unwrap();
        state.apply(Action::Commit, &dataset).unwrap();

        assert_eq!(state.criteria().text, "javascript");
        assert_eq!(state.draft(), state.criteria());
        assert_eq!(state.phase(), Phase::ResultsDisplayed);
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let dataset = sample().await;
        let mut state = InteractionState::new();
        let toggle = Action::ToggleSkill {
            skill: "React".into(),
        };
        state.apply(toggle.clone(), &dataset).unwrap();
        assert!(state.draft().skills.contains("React"));
        state.apply(toggle, &dataset).unwrap();
        assert!(state.draft().skills.is_empty());
    }

    #[tokio::test]
    async fn test_clear_all_resets_draft_and_criteria() {
        let dataset = sample().await;
        let mut state = InteractionState::new();
        state.apply(edit_text("dev"), &dataset).unwrap();
        state.apply(Action::Commit, &dataset).unwrap();
        state.apply(edit_text("engineer"), &dataset).unwrap();
        state.apply(Action::ClearAll, &dataset).unwrap();

        assert!(state.draft().is_empty());
        assert!(state.criteria().is_empty());
    }

    #[tokio::test]
    async fn test_remove_criterion_is_immediate_and_narrow() {
        let dataset = sample().await;
        let mut state = InteractionState::new();
        state
            .apply(
                Action::SetLocations {
                    locations: vec!["London, UK".into(), "Remote".into()],
                },
                &dataset,
            )
            .unwrap();
        state.apply(edit_text("dev"), &dataset).unwrap();
        state.apply(Action::Commit, &dataset).unwrap();

        state
            .apply(
                Action::RemoveCriterion {
                    kind: CriterionKind::Location,
                    value: Some("London, UK".into()),
                },
                &dataset,
            )
            .unwrap();

        assert_eq!(state.criteria().text, "dev");
        assert_eq!(state.criteria().locations.len(), 1);
        assert!(state.criteria().locations.contains("Remote"));
        // The draft keeps what the user typed.
        assert_eq!(state.draft().locations.len(), 2);

        state
            .apply(
                Action::RemoveCriterion {
                    kind: CriterionKind::Text,
                    value: None,
                },
                &dataset,
            )
            .unwrap();
        assert!(state.criteria().text.is_empty());
    }

    #[tokio::test]
    async fn test_remove_skill_without_value_is_rejected() {
        let dataset = sample().await;
        let mut state = InteractionState::new();
        let before = state.clone();
        let err = state
            .apply(
                Action::RemoveCriterion {
                    kind: CriterionKind::Skill,
                    value: None,
                },
                &dataset,
            )
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::MissingValue {
                kind: CriterionKind::Skill
            }
        );
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn test_select_and_close_detail() {
        let dataset = sample().await;
        let mut state = InteractionState::new();
        state.apply(Action::Select { job_id: 2 }, &dataset).unwrap();
        assert_eq!(state.selected_id(), Some(2));
        assert_eq!(state.phase(), Phase::DetailOpen);

        state.apply(Action::CloseDetail, &dataset).unwrap();
        assert!(state.selected_id().is_none());
        assert_eq!(state.phase(), Phase::ResultsDisplayed);
    }

    #[tokio::test]
    async fn test_select_unknown_posting_leaves_state() {
        let dataset = sample().await;
        let mut state = InteractionState::new();
        state.apply(Action::Select { job_id: 3 }, &dataset).unwrap();
        let err = state
            .apply(Action::Select { job_id: 404 }, &dataset)
            .unwrap_err();
        assert_eq!(err, TransitionError::UnknownPosting(404));
        assert_eq!(state.selected_id(), Some(3));
    }

    #[test]
    fn test_action_wire_format() {
        let action: Action = serde_json::from_str(
            r#"{"type": "remove_criterion", "kind": "location", "value": "London, UK"}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            Action::RemoveCriterion {
                kind: CriterionKind::Location,
                value: Some("London, UK".into()),
            }
        );

        let action: Action = serde_json::from_str(r#"{"type": "commit"}"#).unwrap();
        assert_eq!(action, Action::Commit);
        assert!(action.touches_criteria());

        let action: Action = serde_json::from_str(r#"{"type": "select", "job_id": 7}"#).unwrap();
        assert!(!action.touches_criteria());
    }

    #[tokio::test]
    async fn test_removed_chip_stays_pending_in_draft() {
        let dataset = sample().await;
        let mut state = InteractionState::new();
        state
            .apply(
                Action::ToggleSkill {
                    skill: "AWS".into(),
                },
                &dataset,
            )
            .unwrap();
        state.apply(Action::Commit, &dataset).unwrap();
        assert_eq!(state.phase(), Phase::ResultsDisplayed);

        state
            .apply(
                Action::RemoveCriterion {
                    kind: CriterionKind::Skill,
                    value: Some("AWS".into()),
                },
                &dataset,
            )
            .unwrap();
        assert_eq!(state.phase(), Phase::DraftEditing);
        assert!(state.draft().skills.contains("AWS"));

        // Committing again brings the removed value back.
        state.apply(Action::Commit, &dataset).unwrap();
        assert!(state.criteria().skills.contains("AWS"));
        assert_eq!(state.phase(), Phase::ResultsDisplayed);
    }
}
