//! Match pipeline — one profile in, ranked matches out.
//!
//! Flow: build the catalog from the store, fall back to any caller-supplied
//! programs when the store yields nothing, then rank with the matching
//! service. The pipeline never retries and never returns partial results:
//! a matching failure propagates as a single error for the caller to
//! surface.

use tracing::{info, warn};

use crate::catalog::{build_catalog, FieldHeuristic, SkippedDocument};
use crate::errors::AppError;
use crate::extraction::GrantExtractor;
use crate::matching::matcher::GrantMatcher;
use crate::models::grant::{GrantProgram, MatchedGrant};
use crate::models::profile::SmeProfile;
use crate::store::DocumentStore;

/// Result of one match request. Matches are in the model's order; the
/// presentation layer applies the defensive score sort.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub matches: Vec<MatchedGrant>,
    /// How many programs were actually sent to the matching service.
    pub catalog_size: usize,
    pub skipped: Vec<SkippedDocument>,
}

/// Runs one full match request against the current store contents.
///
/// `fallback_programs` is consulted only when the store produces an empty
/// catalog (no documents, or every document skipped); it is ignored
/// otherwise. An empty catalog with no fallback still goes to the matching
/// service, which is expected to return an empty ranking for it.
pub async fn run_match(
    store: &DocumentStore,
    extractor: &dyn GrantExtractor,
    heuristic: &dyn FieldHeuristic,
    matcher: &dyn GrantMatcher,
    profile: &SmeProfile,
    fallback_programs: Vec<GrantProgram>,
) -> Result<MatchOutcome, AppError> {
    let build = build_catalog(store, extractor, heuristic).await?;

    let programs = if build.programs.is_empty() {
        warn!(
            "No grant documents were analyzed; falling back to {} pre-supplied program(s)",
            fallback_programs.len()
        );
        fallback_programs
    } else {
        build.programs
    };

    info!(
        "Matching SME profile against {} grant program(s)",
        programs.len()
    );
    let matches = matcher.match_grants(profile, &programs).await?;
    info!("Matching service returned {} match(es)", matches.len());

    Ok(MatchOutcome {
        matches,
        catalog_size: programs.len(),
        skipped: build.skipped,
    })
}
