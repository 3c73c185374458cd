use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::catalog::SkippedDocument;
use crate::errors::AppError;
use crate::matching::{run_match, sort_by_score};
use crate::models::grant::{GrantProgram, MatchedGrant};
use crate::models::profile::{validate_profile, SmeProfile};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MatchRequest {
    pub sme_profile: SmeProfile,
    /// Optional pre-supplied programs, consulted only when the store
    /// yields an empty catalog.
    #[serde(default)]
    pub grant_programs: Vec<GrantProgram>,
}

#[derive(Serialize)]
pub struct MatchResponse {
    /// Matches sorted by score, highest first.
    pub matches: Vec<MatchedGrant>,
    pub catalog_size: usize,
    pub skipped: Vec<SkippedDocument>,
}

/// POST /api/v1/match
///
/// Stateless one-shot pipeline for clients that do not need a session:
/// validate the profile, build the catalog, rank it, return the sorted
/// matches.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let field_errors = validate_profile(&req.sme_profile);
    if !field_errors.is_empty() {
        return Err(AppError::UnprocessableEntity(
            serde_json::to_string(&field_errors).unwrap_or_default(),
        ));
    }

    let outcome = run_match(
        &state.store,
        state.extractor.as_ref(),
        state.heuristic.as_ref(),
        state.matcher.as_ref(),
        &req.sme_profile,
        req.grant_programs,
    )
    .await?;

    let mut matches = outcome.matches;
    sort_by_score(&mut matches);

    Ok(Json(MatchResponse {
        matches,
        catalog_size: outcome.catalog_size,
        skipped: outcome.skipped,
    }))
}
