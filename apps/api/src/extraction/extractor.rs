//! Grant document extraction — turns one PDF into structured program details.
//!
//! `AppState` holds an `Arc<dyn GrantExtractor>`, so tests swap in
//! deterministic stubs and the catalog builder never knows which backend
//! it is talking to.

use async_trait::async_trait;
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::prompts::{EXTRACTION_PROMPT, EXTRACTION_SYSTEM};
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::grant::ExtractedGrantDetails;
use crate::store::DocumentPayload;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The extraction seam. One document in, exactly one fully populated
/// record out; any failure surfaces as a single error with no partial
/// result.
#[async_trait]
pub trait GrantExtractor: Send + Sync {
    async fn extract(&self, document: &DocumentPayload)
        -> Result<ExtractedGrantDetails, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmGrantExtractor — production backend
// ────────────────────────────────────────────────────────────────────────────

/// Extractor backed by the Anthropic API. The PDF travels as an inline
/// document block; no local PDF parsing happens anywhere in the pipeline.
pub struct LlmGrantExtractor {
    llm: LlmClient,
}

impl LlmGrantExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl GrantExtractor for LlmGrantExtractor {
    async fn extract(
        &self,
        document: &DocumentPayload,
    ) -> Result<ExtractedGrantDetails, AppError> {
        debug!("Extracting grant details from {}", document.file_name);

        let system = format!("{EXTRACTION_SYSTEM} {JSON_ONLY_SYSTEM}");
        let prompt = EXTRACTION_PROMPT.replace("{grounding_instruction}", GROUNDING_INSTRUCTION);

        self.llm
            .call_json_with_document(&prompt, &system, &document.media_type, &document.data)
            .await
            .map_err(|e| {
                AppError::Llm(format!(
                    "Grant extraction failed for {}: {e}",
                    document.file_name
                ))
            })
    }
}
