use std::sync::Arc;

use crate::config::Config;
use crate::matching::score_store::{MatchScoreStore, MemoryMatchScoreStore};
use crate::store::MemStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Marketplace tables: users, profiles, jobs, applications, messages, learning.
    pub store: Arc<MemStore>,
    /// Pluggable score store. Default: in-memory. PostgreSQL when DATABASE_URL is set.
    pub match_scores: Arc<dyn MatchScoreStore>,
    pub config: Config,
}

impl AppState {
    /// Fully in-memory state, as used by the default deployment and the router tests.
    pub fn in_memory(config: Config) -> Self {
        Self {
            store: Arc::new(MemStore::new()),
            match_scores: Arc::new(MemoryMatchScoreStore::new()),
            config,
        }
    }
}
