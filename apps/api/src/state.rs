use std::sync::Arc;

use crate::catalog::FieldHeuristic;
use crate::config::Config;
use crate::extraction::GrantExtractor;
use crate::matching::GrantMatcher;
use crate::session::SessionStore;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only grant PDF directory, enumerated fresh per match request.
    pub store: DocumentStore,
    /// Pluggable extraction backend. Default: LlmGrantExtractor. Tests swap
    /// in deterministic stubs.
    pub extractor: Arc<dyn GrantExtractor>,
    /// Pluggable matching backend. Default: LlmGrantMatcher.
    pub matcher: Arc<dyn GrantMatcher>,
    /// Pluggable sector/location derivation. Default: PresenceHeuristic,
    /// the swap point for a future real classifier.
    pub heuristic: Arc<dyn FieldHeuristic>,
    /// In-memory session map. Nothing survives a restart.
    pub sessions: SessionStore,
}
