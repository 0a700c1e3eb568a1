use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus dataset and session counts.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "devjobs-api",
        "postings": state.board.dataset().len(),
        "rejected_postings": state.board.dataset().rejected().len(),
        "sessions": state.sessions.len().await
    }))
}
