// Extraction Service — per-document LLM analysis of grant PDFs.
// All LLM calls go through llm_client; nothing here talks to the
// Anthropic API directly.

pub mod extractor;
pub mod handlers;
pub mod prompts;

// Re-export the public API consumed by the catalog builder and handlers.
pub use extractor::{GrantExtractor, LlmGrantExtractor};
