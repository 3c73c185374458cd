// Matching Service — ranks the grant catalog against an SME profile, plus
// the per-request pipeline that ties the store, extraction and ranking
// together. All LLM calls go through llm_client.

pub mod handlers;
pub mod matcher;
pub mod pipeline;
pub mod prompts;

// Re-export the public API consumed by the session controller.
pub use matcher::{sort_by_score, GrantMatcher, LlmGrantMatcher};
pub use pipeline::run_match;
