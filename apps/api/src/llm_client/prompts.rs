// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output. Appended to the
/// extraction and matching system prompts, since both parse the response
/// text as JSON directly.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to prompts that must stay grounded in supplied
/// material (a document or a set of program details).
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Base every field on the supplied content only. \
    Do NOT infer, interpolate, or invent details that the source does not state.";
