mod config;
mod db;
mod errors;
mod matching;
mod models;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_match_score_schema};
use crate::matching::score_store::PgMatchScoreStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting InternHub API v{}", env!("CARGO_PKG_VERSION"));

    // Match score store: process memory unless PostgreSQL is configured
    let mut state = AppState::in_memory(config.clone());
    match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_match_score_schema(&pool).await?;
            state.match_scores = Arc::new(PgMatchScoreStore::new(pool));
            info!("Match scores persisted in PostgreSQL");
        }
        None => info!("DATABASE_URL not set; match scores kept in memory"),
    }
    info!(
        "Matching limits: default {}, max {}",
        config.match_default_limit, config.match_max_limit
    );

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
