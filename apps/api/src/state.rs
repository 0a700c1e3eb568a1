use std::sync::Arc;

use crate::config::Config;
use crate::search::JobBoard;
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Dataset and derived options. Read-only for the life of the process.
    pub board: Arc<JobBoard>,
    pub sessions: SessionStore,
    pub config: Config,
}
