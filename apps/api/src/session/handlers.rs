use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::run_match;
use crate::models::grant::GrantProgram;
use crate::models::profile::{validate_profile, SmeProfile};
use crate::session::{Session, SessionState};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SubmitProfileRequest {
    pub sme_profile: SmeProfile,
    /// Optional pre-supplied programs, consulted only when the store
    /// yields an empty catalog.
    #[serde(default)]
    pub grant_programs: Vec<GrantProgram>,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<Json<Session>, AppError> {
    let session = Session::new();
    let mut sessions = state.sessions.write().await;
    sessions.insert(session.id, session.clone());
    Ok(Json(session))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, AppError> {
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    Ok(Json(session.clone()))
}

/// DELETE /api/v1/sessions/:id
///
/// Frees the session's map entry. Rejected while a match is in flight,
/// like reset, so the pipeline task always finds its session on commit.
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    if session.state == SessionState::Matching {
        return Err(AppError::Conflict(
            "Cannot delete while a match request is in flight".to_string(),
        ));
    }
    sessions.remove(&id);
    Ok(Json(serde_json::json!({ "deleted": id })))
}

/// POST /api/v1/sessions/:id/start
pub async fn handle_start_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    session.start()?;
    Ok(Json(session.clone()))
}

/// POST /api/v1/sessions/:id/profile
///
/// Validates and submits the profile, then runs the match pipeline in a
/// spawned task whose outcome is committed to the session even if this
/// request future is dropped by a disconnecting client. The session map's
/// lock is held only for the state transitions, never across the LLM
/// calls. A pipeline failure is not an HTTP error: the session returns to
/// `profile-capture` carrying the user-visible message.
pub async fn handle_submit_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitProfileRequest>,
) -> Result<Json<Session>, AppError> {
    let field_errors = validate_profile(&req.sme_profile);
    if !field_errors.is_empty() {
        return Err(AppError::UnprocessableEntity(
            serde_json::to_string(&field_errors).unwrap_or_default(),
        ));
    }

    {
        let mut sessions = state.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        session.begin_matching(req.sme_profile.clone())?;
    }

    let task = tokio::spawn(settle_match(state, id, req.sme_profile, req.grant_programs));
    let session = task
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Match task failed: {e}")))??;
    Ok(Json(session))
}

/// Runs the pipeline and commits the outcome to the session. Spawned
/// detached from the submit request: the session entered `matching` before
/// the spawn, and this task performs the only exit, whether or not the
/// request future survives to observe it.
async fn settle_match(
    state: AppState,
    id: Uuid,
    profile: SmeProfile,
    fallback_programs: Vec<GrantProgram>,
) -> Result<Session, AppError> {
    let outcome = run_match(
        &state.store,
        state.extractor.as_ref(),
        state.heuristic.as_ref(),
        state.matcher.as_ref(),
        &profile,
        fallback_programs,
    )
    .await;

    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    match outcome {
        Ok(outcome) => session.complete_matching(outcome.matches),
        Err(e) => {
            warn!("Match request failed for session {id}: {e}");
            session.fail_matching(format!(
                "An error occurred while finding matches. Please check the grant \
                 documents in the '{}' directory and try again.",
                state.config.grants_dir
            ));
        }
    }
    Ok(session.clone())
}

/// POST /api/v1/sessions/:id/reset
pub async fn handle_reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    session.reset()?;
    Ok(Json(session.clone()))
}
