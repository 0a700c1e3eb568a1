//! In-memory session store. Each browser tab gets its own `SearchSession`.
//!
//! Sessions are keyed by a random UUID and held behind one `RwLock`; every
//! dispatch takes the write lock, so transitions never interleave. A session
//! left idle for longer than the configured TTL is dropped: lazily when it is
//! next looked up, and in bulk whenever a new session is created.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::presentation::{board_view, BoardView, PostingDetail};
use crate::search::{Action, JobBoard, SearchSession};

struct SessionEntry {
    session: SearchSession,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    last_active: Instant,
}

impl SessionEntry {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.last_active) > ttl
    }

    fn view(&self, id: Uuid, page: usize, page_size: usize) -> SessionView {
        SessionView {
            id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            board: board_view(&self.session, page, page_size),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub board: BoardView,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::default(),
            ttl,
        }
    }

    pub async fn create(&self, board: Arc<JobBoard>, page_size: usize) -> SessionView {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let entry = SessionEntry {
            session: SearchSession::new(board),
            created_at: now,
            updated_at: now,
            last_active: Instant::now(),
        };
        let view = entry.view(id, 1, page_size);

        let mut sessions = self.inner.write().await;
        let expired = prune_expired(&mut sessions, self.ttl);
        sessions.insert(id, entry);
        info!(session_id = %id, active = sessions.len(), expired, "Session created");
        view
    }

    pub async fn view(&self, id: Uuid, page: usize, page_size: usize) -> Result<SessionView, AppError> {
        let mut sessions = self.inner.write().await;
        let entry = live_entry(&mut sessions, id, self.ttl)?;
        Ok(entry.view(id, page, page_size))
    }

    pub async fn dispatch(
        &self,
        id: Uuid,
        action: Action,
        page: usize,
        page_size: usize,
    ) -> Result<SessionView, AppError> {
        let mut sessions = self.inner.write().await;
        let entry = live_entry(&mut sessions, id, self.ttl)?;
        entry.session.dispatch(action)?;
        entry.updated_at = Utc::now();
        Ok(entry.view(id, page, page_size))
    }

    pub async fn selected(&self, id: Uuid) -> Result<Option<PostingDetail>, AppError> {
        let mut sessions = self.inner.write().await;
        let entry = live_entry(&mut sessions, id, self.ttl)?;
        Ok(entry.session.selected().map(PostingDetail::from))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mut sessions = self.inner.write().await;
        sessions.remove(&id).ok_or_else(|| not_found(id))?;
        info!(session_id = %id, active = sessions.len(), "Session ended");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

/// Drops every session idle past `ttl`; returns how many went.
fn prune_expired(sessions: &mut HashMap<Uuid, SessionEntry>, ttl: Duration) -> usize {
    let now = Instant::now();
    let before = sessions.len();
    sessions.retain(|_, entry| !entry.is_expired(now, ttl));
    before - sessions.len()
}

/// Looks up a session and marks it active. An expired one is removed and
/// reported as missing.
fn live_entry(
    sessions: &mut HashMap<Uuid, SessionEntry>,
    id: Uuid,
    ttl: Duration,
) -> Result<&mut SessionEntry, AppError> {
    let now = Instant::now();
    if sessions.get(&id).is_some_and(|e| e.is_expired(now, ttl)) {
        sessions.remove(&id);
        info!(session_id = %id, "Session expired");
    }
    let entry = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
    entry.last_active = now;
    Ok(entry)
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
