mod config;
mod dataset;
mod errors;
mod extract;
mod models;
mod presentation;
mod routes;
mod search;
mod sessions;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::dataset::{source_for, Dataset};
use crate::routes::build_router;
use crate::search::JobBoard;
use crate::sessions::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting DevJobs API v{}", env!("CARGO_PKG_VERSION"));

    // Load the dataset once; it is never mutated afterwards
    let source = source_for(config.jobs_data_path.as_deref());
    let dataset = Dataset::load(source.as_ref())
        .await
        .with_context(|| format!("Failed to load postings from {}", source.describe()))?;
    info!(
        "Loaded {} postings from {}",
        dataset.len(),
        source.describe()
    );
    if dataset.is_empty() {
        warn!("Dataset has no usable postings; every search will be empty");
    }
    if !dataset.rejected().is_empty() {
        warn!("{} postings were skipped as malformed", dataset.rejected().len());
    }

    // Derive location/skill options once for the life of the process
    let board = Arc::new(JobBoard::new(dataset));
    info!(
        "Filter options: {} locations, {} skills",
        board.options().locations.len(),
        board.options().skills.len()
    );

    let state = AppState {
        board,
        sessions: SessionStore::new(config.session_ttl),
        config: config.clone(),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
