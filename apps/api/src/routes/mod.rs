pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::search::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/options", get(handlers::handle_get_options))
        .route("/api/v1/jobs/:id", get(handlers::handle_get_job))
        .route("/api/v1/search", post(handlers::handle_search))
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/actions",
            post(handlers::handle_dispatch),
        )
        .route(
            "/api/v1/sessions/:id/selected",
            get(handlers::handle_get_selected),
        )
        .with_state(state)
}
