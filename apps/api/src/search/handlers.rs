//! Axum route handlers for the job search API.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::presentation::{results_view, PostingDetail, ResultsView};
use crate::search::filter::{apply_filters, FilterCriteria};
use crate::search::{Action, FilterOptions};
use crate::sessions::SessionView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

impl PageQuery {
    fn page(&self) -> Result<usize, AppError> {
        match self.page {
            Some(0) => Err(AppError::Validation("page must be 1 or greater".to_string())),
            Some(p) => Ok(p),
            None => Ok(1),
        }
    }
}

/// GET /api/v1/options
pub async fn handle_get_options(State(state): State<AppState>) -> Json<FilterOptions> {
    Json(state.board.options().clone())
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<PostingDetail>, AppError> {
    let posting = state
        .board
        .posting(id)
        .ok_or_else(|| AppError::NotFound(format!("Posting {id} not found")))?;
    Ok(Json(PostingDetail::from(posting)))
}

/// POST /api/v1/search?page=N
///
/// One-shot filtering with no session: the body is a full set of criteria.
pub async fn handle_search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
    ApiJson(criteria): ApiJson<FilterCriteria>,
) -> Result<Json<ResultsView>, AppError> {
    let page = query.page()?;
    let results = apply_filters(state.board.dataset().postings(), &criteria);
    Ok(Json(results_view(&results, page, state.config.page_size)))
}

/// POST /api/v1/sessions
///
/// Starts a session with empty criteria: the whole dataset on page 1.
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    let view = state
        .sessions
        .create(state.board.clone(), state.config.page_size)
        .await;
    (StatusCode::CREATED, Json(view))
}

/// GET /api/v1/sessions/:id?page=N
pub async fn handle_get_session(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .sessions
        .view(id, query.page()?, state.config.page_size)
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/actions?page=N
///
/// Applies one action and returns the session as it now stands.
pub async fn handle_dispatch(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<PageQuery>,
    ApiJson(action): ApiJson<Action>,
) -> Result<Json<SessionView>, AppError> {
    let page = query.page()?;
    let view = state
        .sessions
        .dispatch(id, action, page, state.config.page_size)
        .await?;
    Ok(Json(view))
}

/// GET /api/v1/sessions/:id/selected
pub async fn handle_get_selected(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Option<PostingDetail>>, AppError> {
    Ok(Json(state.sessions.selected(id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
