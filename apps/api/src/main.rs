mod catalog;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod matching;
mod models;
mod routes;
mod session;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::PresenceHeuristic;
use crate::config::Config;
use crate::extraction::LlmGrantExtractor;
use crate::llm_client::LlmClient;
use crate::matching::LlmGrantMatcher;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;
use crate::store::DocumentStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Targets use the crate name with underscores, not the package name.
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting GrantMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the document store (read-only, enumerated per request)
    let store = DocumentStore::new(&config.grants_dir);
    info!("Grant document store: {}", store.dir().display());

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize the extraction and matching backends plus the
    // sector/location heuristic (PresenceHeuristic by default)
    let extractor = Arc::new(LlmGrantExtractor::new(llm.clone()));
    let matcher = Arc::new(LlmGrantMatcher::new(llm));
    let heuristic = Arc::new(PresenceHeuristic::new());

    // Initialize the in-memory session map
    let sessions: SessionStore = Arc::new(RwLock::new(HashMap::new()));

    // Build app state
    let state = AppState {
        config: config.clone(),
        store,
        extractor,
        matcher,
        heuristic,
        sessions,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
