//! View models for the results table, the detail panel and the active-filter bar.
//!
//! Everything here is a pure projection of core state into display strings;
//! no filtering decisions are made in this module.

use serde::Serialize;

use crate::models::{JobPosting, SalaryRange};
use crate::presentation::pagination::{paginate, Page};
use crate::search::filter::FilterCriteria;
use crate::search::interaction::{CriterionKind, Phase};
use crate::search::session::SearchSession;

const AVATAR_PALETTE: [&str; 6] = [
    "#f56a00", "#7265e6", "#ffbf00", "#00a2ae", "#1890ff", "#52c41a",
];

/// Skill chips shown inline in a table row before the rest collapse into "+N".
const INLINE_SKILLS: usize = 2;

const HEADING_RESULTS: &str = "Latest Opportunities";
const HEADING_EMPTY: &str = "No Jobs Found";
const EMPTY_MESSAGE: &str = "No jobs match your filters";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Avatar {
    pub initial: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoreChip {
    pub label: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillChips {
    pub shown: Vec<String>,
    pub more: Option<MoreChip>,
    /// No tags listed; the row shows a single "General" chip.
    pub general: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostingRow {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub avatar: Avatar,
    pub location: String,
    pub location_known: bool,
    pub skills: SkillChips,
    pub salary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostingDetail {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub initial: String,
    pub salary: String,
    pub location: String,
    pub published: &'static str,
    pub description: String,
    pub skills: Vec<String>,
    pub skills_message: Option<&'static str>,
    pub apply_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterChip {
    pub kind: CriterionKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    pub heading: &'static str,
    pub count: usize,
    pub empty_message: Option<&'static str>,
    pub page: Page<PostingRow>,
}

/// Everything a front end needs to draw one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub phase: Phase,
    pub draft: FilterCriteria,
    pub criteria: FilterCriteria,
    pub active_filters: Vec<FilterChip>,
    pub results: ResultsView,
    pub selected: Option<PostingDetail>,
}

impl From<&JobPosting> for PostingRow {
    fn from(posting: &JobPosting) -> Self {
        PostingRow {
            id: posting.id,
            title: posting.title.clone(),
            company: posting.company.clone(),
            avatar: Avatar {
                initial: initial(&posting.company),
                color: avatar_color(&posting.company),
            },
            location: posting
                .location
                .clone()
                .unwrap_or_else(|| "Remote / Unspecified".to_string()),
            location_known: posting.location.is_some(),
            skills: skill_chips(&posting.tags),
            salary: posting
                .salary
                .map(salary_band)
                .unwrap_or_else(|| "Competitive".to_string()),
        }
    }
}

impl From<&JobPosting> for PostingDetail {
    fn from(posting: &JobPosting) -> Self {
        PostingDetail {
            id: posting.id,
            title: posting.title.clone(),
            company: posting.company.clone(),
            initial: initial(&posting.company),
            salary: posting
                .salary
                .map(|s| format!("£{}k", thousands(s.min)))
                .unwrap_or_else(|| "N/A".to_string()),
            location: posting
                .location
                .clone()
                .unwrap_or_else(|| "Remote".to_string()),
            published: "Recently",
            description: posting.description.clone(),
            skills: posting.tags.clone(),
            skills_message: (!posting.has_tags()).then_some("No specific skills listed."),
            apply_url: posting.url.clone(),
        }
    }
}

pub fn results_view(results: &[&JobPosting], page: usize, page_size: usize) -> ResultsView {
    let count = results.len();
    ResultsView {
        heading: if count > 0 { HEADING_RESULTS } else { HEADING_EMPTY },
        count,
        empty_message: (count == 0).then_some(EMPTY_MESSAGE),
        page: paginate(results, page, page_size).map(PostingRow::from),
    }
}

/// One chip per committed criterion, text first. Empty when nothing is active.
pub fn active_filters(criteria: &FilterCriteria) -> Vec<FilterChip> {
    let text = (!criteria.text.is_empty()).then(|| FilterChip {
        kind: CriterionKind::Text,
        value: criteria.text.clone(),
    });
    let locations = criteria.locations.iter().map(|l| FilterChip {
        kind: CriterionKind::Location,
        value: l.clone(),
    });
    let skills = criteria.skills.iter().map(|s| FilterChip {
        kind: CriterionKind::Skill,
        value: s.clone(),
    });
    text.into_iter().chain(locations).chain(skills).collect()
}

pub fn board_view(session: &SearchSession, page: usize, page_size: usize) -> BoardView {
    let state = session.state();
    BoardView {
        phase: state.phase(),
        draft: state.draft().clone(),
        criteria: state.criteria().clone(),
        active_filters: active_filters(state.criteria()),
        results: results_view(&session.results(), page, page_size),
        selected: session.selected().map(PostingDetail::from),
    }
}

fn skill_chips(tags: &[String]) -> SkillChips {
    if tags.is_empty() {
        return SkillChips {
            shown: vec!["General".to_string()],
            more: None,
            general: true,
        };
    }

    let split = tags.len().min(INLINE_SKILLS);
    let hidden = &tags[split..];
    SkillChips {
        shown: tags[..split].to_vec(),
        more: (!hidden.is_empty()).then(|| MoreChip {
            label: format!("+{}", hidden.len()),
            tooltip: hidden.join(", "),
        }),
        general: false,
    }
}

fn salary_band(salary: SalaryRange) -> String {
    format!("£{}k - £{}k", thousands(salary.min), thousands(salary.max))
}

/// Whole thousands, halves rounded away from zero.
fn thousands(amount: f64) -> i64 {
    (amount / 1000.0).round() as i64
}

fn initial(company: &str) -> String {
    company
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Deterministic palette pick from the company name.
///
/// Folds UTF-16 code units with `hash = unit + ((hash << 5) - hash)`, where the
/// shift operates on the low 32 bits of `hash` and the subtraction does not
/// wrap. Front ends written against the same rule draw the same colours.
fn avatar_color(name: &str) -> &'static str {
    let mut hash: i64 = 0;
    for unit in name.encode_utf16() {
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        hash = i64::from(unit) + (shifted - hash);
    }
    AVATAR_PALETTE[(hash.unsigned_abs() % AVATAR_PALETTE.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dataset::tests::sample;
    use crate::search::interaction::Action;
    use crate::search::session::JobBoard;

    #[test]
    fn test_avatar_colors_are_stable() {
        assert_eq!(avatar_color("Bright Purple Resourcing"), "#00a2ae");
        assert_eq!(avatar_color("Searchstone Ltd"), "#52c41a");
        assert_eq!(avatar_color("Tech Solutions Inc"), "#ffbf00");
        assert_eq!(avatar_color("Mobile First"), "#f56a00");
        assert_eq!(avatar_color("A"), "#52c41a");
        assert_eq!(avatar_color(""), "#f56a00");
    }

    #[test]
    fn test_initial_is_uppercased_first_char() {
        assert_eq!(initial("mobile First"), "M");
        assert_eq!(initial("ßeta"), "SS");
        assert_eq!(initial(""), "");
    }

    #[test]
    fn test_thousands_rounds_half_up() {
        assert_eq!(thousands(2500.0), 3);
        assert_eq!(thousands(60000.0), 60);
        assert_eq!(thousands(74499.0), 74);
    }

    #[tokio::test]
    async fn test_row_for_tagged_posting() {
        let dataset = sample().await;
        let row = PostingRow::from(dataset.get(7).unwrap());
        assert_eq!(row.location, "Remote");
        assert!(row.location_known);
        assert_eq!(row.skills.shown, vec!["Mobile", "React Native"]);
        assert_eq!(
            row.skills.more,
            Some(MoreChip {
                label: "+1".to_string(),
                tooltip: "iOS".to_string()
            })
        );
        assert_eq!(row.salary, "£50k - £75k");
        assert_eq!(row.avatar.initial, "M");
    }

    #[tokio::test]
    async fn test_row_for_untagged_posting() {
        let dataset = sample().await;
        let row = PostingRow::from(dataset.get(1).unwrap());
        assert!(row.skills.general);
        assert_eq!(row.skills.shown, vec!["General"]);
        assert!(row.skills.more.is_none());
    }

    #[tokio::test]
    async fn test_row_with_two_tags_has_no_overflow() {
        let dataset = sample().await;
        let row = PostingRow::from(dataset.get(5).unwrap());
        assert_eq!(row.skills.shown, vec!["React", "TypeScript"]);
        assert!(row.skills.more.is_none());
    }

    #[test]
    fn test_row_and_detail_fallbacks() {
        let posting = JobPosting {
            id: 9,
            title: "Platform Engineer".to_string(),
            company: "acme".to_string(),
            location: None,
            salary: None,
            tags: vec![],
            raw_tags: None,
            url: "#".to_string(),
            description: "Keep the lights on.".to_string(),
        };

        let row = PostingRow::from(&posting);
        assert_eq!(row.location, "Remote / Unspecified");
        assert!(!row.location_known);
        assert_eq!(row.salary, "Competitive");

        let detail = PostingDetail::from(&posting);
        assert_eq!(detail.salary, "N/A");
        assert_eq!(detail.location, "Remote");
        assert_eq!(detail.initial, "A");
        assert_eq!(detail.skills_message, Some("No specific skills listed."));
    }

    #[tokio::test]
    async fn test_detail_view() {
        let dataset = sample().await;
        let detail = PostingDetail::from(dataset.get(3).unwrap());
        assert_eq!(detail.salary, "£60k");
        assert_eq!(detail.location, "London, UK");
        assert_eq!(detail.skills, vec!["Vanilla JS", "ES6"]);
        assert!(detail.skills_message.is_none());
        assert_eq!(detail.apply_url, "https://www.adzuna.co.uk/jobs/details/5534607241");
        assert_eq!(detail.published, "Recently");
    }

    #[test]
    fn test_active_filters_order() {
        let criteria = FilterCriteria::default()
            .with_text("dev")
            .with_locations(["London, UK"])
            .with_skills(["React", "AWS"]);
        let chips = active_filters(&criteria);
        let values: Vec<&str> = chips.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["dev", "London, UK", "AWS", "React"]);
        assert_eq!(chips[0].kind, CriterionKind::Text);
        assert!(active_filters(&FilterCriteria::default()).is_empty());
    }

    #[test]
    fn test_empty_results_view() {
        let view = results_view(&[], 1, 8);
        assert_eq!(view.heading, "No Jobs Found");
        assert_eq!(view.empty_message, Some("No jobs match your filters"));
        assert_eq!(view.count, 0);
    }

    #[tokio::test]
    async fn test_board_view_tracks_session() {
        let board = Arc::new(JobBoard::new(sample().await));
        let mut session = SearchSession::new(board);
        session
            .dispatch(Action::EditText {
                text: "javascript".into(),
            })
            .unwrap();
        session.dispatch(Action::Commit).unwrap();
        session.dispatch(Action::Select { job_id: 4 }).unwrap();

        let view = board_view(&session, 1, 2);
        assert_eq!(view.phase, Phase::DetailOpen);
        assert_eq!(view.results.heading, "Latest Opportunities");
        assert_eq!(view.results.count, 3);
        assert_eq!(view.results.page.total_pages, 2);
        let ids: Vec<i64> = view.results.page.items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(view.active_filters.len(), 1);
        assert_eq!(view.selected.map(|d| d.id), Some(4));
    }
}
