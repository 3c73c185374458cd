// All LLM prompt constants for the Matching module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Role half of the matching system prompt.
pub const MATCH_SYSTEM: &str =
    "You are an expert consultant who matches small and medium enterprises \
    with suitable grant programs. You judge eligibility and relevance from \
    the SME's profile and each program's details.";

/// Matching prompt template. Replace `{grounding_instruction}`,
/// `{sme_profile}` and `{grant_programs}` before sending.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Based on the SME's profile and the details of the grant programs below, determine the best matches and rank them by relevance.

SME Profile:
{sme_profile}

Grant Programs:
{grant_programs}

{grounding_instruction}

Return a JSON array. Each element must have this EXACT schema (no extra fields):
{
  "program_name": "<name of the matched grant program>",
  "match_score": 85,
  "eligibility": "<the program's eligibility criteria>",
  "funding_amount": "<the funding amount offered>",
  "application_deadline": "<the application deadline>",
  "sectors": "<the sectors the program targets>",
  "location": "<the geographic location the program serves>"
}

Rules:
1. "match_score" is a number from 0 to 100 for how well the program fits this SME.
2. Copy "eligibility" from the program's eligibility criteria and the remaining fields from the program's details.
3. Rank the array from best match to worst. Leave out programs that are clearly unsuitable.
4. If no program fits at all, return an empty array [].
5. Return ONLY the JSON array."#;
