// Extraction Service prompt templates.
// All prompts for the extraction module are defined here.
// The JSON-only and grounding fragments from llm_client::prompts are
// appended at call time.

/// Role half of the extraction system prompt.
pub const EXTRACTION_SYSTEM: &str = "You are an expert grant program analyst. \
    You read grant program documents and extract their key details \
    accurately and completely.";

/// User prompt sent alongside the document block. Replace
/// `{grounding_instruction}` before sending.
pub const EXTRACTION_PROMPT: &str = r#"Analyze the attached grant program document and extract the key details, including eligibility criteria, funding amount, and application deadline.

{grounding_instruction}

Return a JSON object with this EXACT structure:
{
  "program_name": "<name of the grant program>",
  "eligibility_criteria": "<who can apply>",
  "funding_amount": "<the funding amount offered>",
  "deadline": "<the application deadline>",
  "description": "<a brief description of the grant program>",
  "application_process": "<how to apply>",
  "contact_information": "<contact details for the program>"
}

Rules:
1. All seven fields are required and must be non-empty strings.
2. Keep funding amounts and deadlines as human-readable text exactly as the document states them. Do not normalize currencies or dates.
3. "description" is a brief summary of what the program offers and who it is for.
4. If a detail is genuinely absent from the document, say so in the field (e.g. "Not specified in the document") rather than leaving it empty.
5. Return ONLY the JSON object."#;
