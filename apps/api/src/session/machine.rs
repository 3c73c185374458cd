//! Session state machine.
//!
//! Transitions are synchronous and run under the session map's write lock;
//! the LLM pipeline itself runs between transitions, with the lock
//! released. `matching` is deliberately sticky: the only exit is performed
//! by the pipeline task the submit request spawned, so a session can never
//! be reset, resubmitted or deleted mid-flight.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::sort_by_score;
use crate::models::grant::{ExtractedGrantDetails, MatchedGrant};
use crate::models::profile::SmeProfile;

/// Shared in-memory session map, keyed by session id.
pub type SessionStore = Arc<RwLock<HashMap<Uuid, Session>>>;

/// Where a session currently is in the match flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionState {
    Initial,
    ProfileCapture,
    Matching,
    Results,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Initial => "initial",
            SessionState::ProfileCapture => "profile-capture",
            SessionState::Matching => "matching",
            SessionState::Results => "results",
        }
    }
}

/// One client's controller state.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub state: SessionState,
    pub profile: Option<SmeProfile>,
    /// Ranked matches, sorted by score descending. Present only in
    /// `results`.
    pub matches: Option<Vec<MatchedGrant>>,
    /// Raw-form details per program name, reconstructed from the matches
    /// for the results view.
    pub details: Option<HashMap<String, ExtractedGrantDetails>>,
    /// User-visible failure message from the last match attempt, shown in
    /// `profile-capture` until a resubmission.
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Initial,
            profile: None,
            matches: None,
            details: None,
            error: None,
            created_at: Utc::now(),
        }
    }

    /// `initial` -> `profile-capture`.
    pub fn start(&mut self) -> Result<(), AppError> {
        match self.state {
            SessionState::Initial => {
                self.state = SessionState::ProfileCapture;
                Ok(())
            }
            _ => Err(AppError::Conflict(format!(
                "Cannot start the questionnaire from the {} state",
                self.state.as_str()
            ))),
        }
    }

    /// `profile-capture` -> `matching`. Pins the profile for the duration
    /// of the request and clears any earlier failure message.
    pub fn begin_matching(&mut self, profile: SmeProfile) -> Result<(), AppError> {
        match self.state {
            SessionState::ProfileCapture => {
                self.profile = Some(profile);
                self.error = None;
                self.state = SessionState::Matching;
                Ok(())
            }
            SessionState::Matching => Err(AppError::Conflict(
                "A match request is already in flight for this session".to_string(),
            )),
            _ => Err(AppError::Conflict(format!(
                "Cannot submit a profile from the {} state",
                self.state.as_str()
            ))),
        }
    }

    /// `matching` -> `results`. Applies the defensive descending score sort
    /// and reconstructs a details record per matched program.
    pub fn complete_matching(&mut self, mut matches: Vec<MatchedGrant>) {
        sort_by_score(&mut matches);
        let details = matches
            .iter()
            .map(|m| (m.program_name.clone(), m.to_details()))
            .collect();
        self.matches = Some(matches);
        self.details = Some(details);
        self.error = None;
        self.state = SessionState::Results;
    }

    /// `matching` -> `profile-capture`, carrying the user-visible failure
    /// message. Nothing is retried automatically; the user resubmits.
    pub fn fail_matching(&mut self, message: String) {
        self.error = Some(message);
        self.matches = None;
        self.details = None;
        self.state = SessionState::ProfileCapture;
    }

    /// Any state except `matching` -> `initial`. Discards the profile,
    /// matches, details and error. An in-flight request cannot be
    /// cancelled, so reset during `matching` is rejected.
    pub fn reset(&mut self) -> Result<(), AppError> {
        if self.state == SessionState::Matching {
            return Err(AppError::Conflict(
                "Cannot reset while a match request is in flight".to_string(),
            ));
        }
        self.profile = None;
        self.matches = None;
        self.details = None;
        self.error = None;
        self.state = SessionState::Initial;
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
