pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers as catalog_handlers;
use crate::extraction::handlers as extraction_handlers;
use crate::matching::handlers as matching_handlers;
use crate::session::handlers as session_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Grant document API
        .route(
            "/api/v1/grants/documents",
            get(catalog_handlers::handle_list_documents),
        )
        .route(
            "/api/v1/grants/analyze",
            post(extraction_handlers::handle_analyze),
        )
        // Stateless match API
        .route("/api/v1/match", post(matching_handlers::handle_match))
        // Session API (client controller)
        .route(
            "/api/v1/sessions",
            post(session_handlers::handle_create_session),
        )
        .route(
            "/api/v1/sessions/:id",
            get(session_handlers::handle_get_session)
                .delete(session_handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/start",
            post(session_handlers::handle_start_session),
        )
        .route(
            "/api/v1/sessions/:id/profile",
            post(session_handlers::handle_submit_profile),
        )
        .route(
            "/api/v1/sessions/:id/reset",
            post(session_handlers::handle_reset_session),
        )
        .with_state(state)
}
