use std::time::Duration;

use anyhow::{ensure, Context, Result};

use crate::presentation::DEFAULT_PAGE_SIZE;

const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

/// Application configuration loaded from environment variables.
/// Every setting has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON file of postings. The embedded sample dataset is used when unset.
    pub jobs_data_path: Option<String>,
    pub page_size: usize,
    /// Idle time after which a search session is dropped.
    pub session_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let page_size = match lookup("PAGE_SIZE") {
            Some(v) => v
                .parse::<usize>()
                .context("PAGE_SIZE must be a positive integer")?,
            None => DEFAULT_PAGE_SIZE,
        };
        ensure!(page_size >= 1, "PAGE_SIZE must be at least 1");

        let session_ttl_secs = match lookup("SESSION_TTL_SECS") {
            Some(v) => v
                .parse::<u64>()
                .context("SESSION_TTL_SECS must be a whole number of seconds")?,
            None => DEFAULT_SESSION_TTL_SECS,
        };
        ensure!(session_ttl_secs >= 1, "SESSION_TTL_SECS must be at least 1");

        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            jobs_data_path: lookup("JOBS_DATA_PATH").filter(|p| !p.trim().is_empty()),
            page_size,
            session_ttl: Duration::from_secs(session_ttl_secs),
        })
    }
}
