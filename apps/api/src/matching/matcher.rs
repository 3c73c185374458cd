//! Grant matching — ranks catalog records against an SME profile.
//!
//! The model decides how many matches come back (anywhere from zero to the
//! whole catalog) and its scoring rationale is opaque; callers get ranked
//! results or a single error, never partial output.

use std::cmp::Ordering;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::AppError;
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::LlmClient;
use crate::matching::prompts::{MATCH_PROMPT_TEMPLATE, MATCH_SYSTEM};
use crate::models::grant::{GrantProgram, MatchedGrant};
use crate::models::profile::SmeProfile;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The matching seam. Carried in `AppState` as `Arc<dyn GrantMatcher>` so
/// tests rank with deterministic stubs.
#[async_trait]
pub trait GrantMatcher: Send + Sync {
    async fn match_grants(
        &self,
        profile: &SmeProfile,
        programs: &[GrantProgram],
    ) -> Result<Vec<MatchedGrant>, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmGrantMatcher — production backend
// ────────────────────────────────────────────────────────────────────────────

/// Matcher backed by the Anthropic API. One call ranks the whole catalog.
pub struct LlmGrantMatcher {
    llm: LlmClient,
}

impl LlmGrantMatcher {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl GrantMatcher for LlmGrantMatcher {
    async fn match_grants(
        &self,
        profile: &SmeProfile,
        programs: &[GrantProgram],
    ) -> Result<Vec<MatchedGrant>, AppError> {
        debug!(
            "Requesting match ranking for {} grant program(s)",
            programs.len()
        );

        let system = format!("{MATCH_SYSTEM} {JSON_ONLY_SYSTEM}");
        let prompt = build_match_prompt(profile, programs)?;

        self.llm
            .call_json(&prompt, &system)
            .await
            .map_err(|e| AppError::Llm(format!("Grant matching failed: {e}")))
    }
}

/// Fills the match template with the profile as pretty JSON and one text
/// block per program carrying all six catalog fields.
fn build_match_prompt(
    profile: &SmeProfile,
    programs: &[GrantProgram],
) -> Result<String, AppError> {
    let profile_json = serde_json::to_string_pretty(profile)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize SME profile: {e}")))?;

    let programs_block = programs
        .iter()
        .map(|p| {
            format!(
                "Program Name: {}\nEligibility Criteria: {}\nFunding Amount: {}\nApplication Deadline: {}\nSectors: {}\nLocation: {}",
                p.program_name,
                p.eligibility_criteria,
                p.funding_amount,
                p.application_deadline,
                p.sectors,
                p.location
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(MATCH_PROMPT_TEMPLATE
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{sme_profile}", &profile_json)
        .replace("{grant_programs}", &programs_block))
}

/// Defensive sort applied before matches are presented: descending score,
/// stable, so equal scores keep the order the model chose. A NaN score
/// compares equal to every neighbor, so it stays where the model put it
/// rather than poisoning the comparison.
pub fn sort_by_score(matches: &mut [MatchedGrant]) {
    matches.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_profile() -> SmeProfile {
        SmeProfile {
            business_type: "Technology".to_string(),
            industry: "Software".to_string(),
            location: "Kuala Lumpur".to_string(),
            revenue: 500_000.0,
            employee_count: 10,
            business_age: 2,
            funding_stage: "Seed".to_string(),
            previous_funding_amount: 0.0,
            purpose_of_funding: "Product Development".to_string(),
        }
    }

    fn make_program(name: &str) -> GrantProgram {
        GrantProgram {
            program_name: name.to_string(),
            eligibility_criteria: "Registered SMEs".to_string(),
            funding_amount: "Up to RM500,000".to_string(),
            application_deadline: "31 December 2025".to_string(),
            sectors: "Various".to_string(),
            location: "Nationwide".to_string(),
        }
    }

    fn make_match(name: &str, score: f64) -> MatchedGrant {
        MatchedGrant {
            program_name: name.to_string(),
            match_score: score,
            eligibility: "e".to_string(),
            funding_amount: "f".to_string(),
            application_deadline: "d".to_string(),
            sectors: "s".to_string(),
            location: "l".to_string(),
        }
    }

    #[test]
    fn test_match_prompt_contains_profile_and_every_program_field() {
        let prompt = build_match_prompt(
            &make_profile(),
            &[make_program("Digitalisation Grant"), make_program("Export Fund")],
        )
        .unwrap();

        assert!(prompt.contains("\"industry\": \"Software\""));
        assert!(prompt.contains("Program Name: Digitalisation Grant"));
        assert!(prompt.contains("Program Name: Export Fund"));
        assert!(prompt.contains("Eligibility Criteria: Registered SMEs"));
        assert!(prompt.contains("Application Deadline: 31 December 2025"));
        assert!(!prompt.contains("{sme_profile}"));
        assert!(!prompt.contains("{grant_programs}"));
        assert!(!prompt.contains("{grounding_instruction}"));
    }

    #[test]
    fn test_match_prompt_with_empty_catalog_still_renders() {
        let prompt = build_match_prompt(&make_profile(), &[]).unwrap();
        assert!(prompt.contains("Grant Programs:"));
        assert!(!prompt.contains("{grant_programs}"));
    }

    #[test]
    fn test_sort_by_score_descends() {
        let mut matches = vec![
            make_match("mid", 80.0),
            make_match("top", 95.0),
            make_match("low", 10.0),
        ];
        sort_by_score(&mut matches);

        let names: Vec<&str> = matches.iter().map(|m| m.program_name.as_str()).collect();
        assert_eq!(names, vec!["top", "mid", "low"]);
    }

    #[test]
    fn test_sort_by_score_is_stable_for_ties() {
        let mut matches = vec![
            make_match("first", 50.0),
            make_match("second", 50.0),
            make_match("third", 50.0),
        ];
        sort_by_score(&mut matches);

        let names: Vec<&str> = matches.iter().map(|m| m.program_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_sort_by_score_preserves_unclamped_scores() {
        let mut matches = vec![make_match("huge", 250.0), make_match("plain", 90.0)];
        sort_by_score(&mut matches);

        assert_eq!(matches[0].program_name, "huge");
        assert_eq!(matches[0].match_score, 250.0);
    }

    #[test]
    fn test_sort_by_score_leaves_nan_scores_in_place() {
        let mut matches = vec![
            make_match("high", 90.0),
            make_match("odd", f64::NAN),
            make_match("low", 50.0),
        ];
        sort_by_score(&mut matches);

        let names: Vec<&str> = matches.iter().map(|m| m.program_name.as_str()).collect();
        assert_eq!(names, vec!["high", "odd", "low"]);
        assert!(matches[1].match_score.is_nan());
    }
}
