use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::heuristics::FieldHeuristic;
use crate::errors::AppError;
use crate::extraction::GrantExtractor;
use crate::models::grant::GrantProgram;
use crate::store::DocumentStore;

/// A document left out of the catalog, with the reason it was skipped.
/// Surfaced to the client so a bad PDF does not fail silently.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedDocument {
    pub name: String,
    pub reason: String,
}

/// The outcome of one catalog build.
#[derive(Debug, Clone)]
pub struct CatalogBuild {
    /// Catalog records in document enumeration order.
    pub programs: Vec<GrantProgram>,
    pub skipped: Vec<SkippedDocument>,
}

/// Builds the grant catalog from whatever the store holds right now.
///
/// Documents are extracted one at a time, in enumeration order. A document
/// that fails to read or extract is logged and skipped; one bad PDF never
/// aborts the build. Only a failure to enumerate the store itself is an
/// error.
pub async fn build_catalog(
    store: &DocumentStore,
    extractor: &dyn GrantExtractor,
    heuristic: &dyn FieldHeuristic,
) -> Result<CatalogBuild, AppError> {
    let documents = store.documents()?;
    info!(
        "Building grant catalog from {} document(s) in {}",
        documents.len(),
        store.dir().display()
    );

    let mut programs = Vec::new();
    let mut skipped = Vec::new();

    for document in &documents {
        // Step 1: load + encode
        let payload = match store.read(document) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Skipping grant document {}: {e}", document.name);
                skipped.push(SkippedDocument {
                    name: document.name.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        // Step 2: structured extraction via the LLM
        let details = match extractor.extract(&payload).await {
            Ok(details) => details,
            Err(e) => {
                warn!("Skipping grant document {}: {e}", document.name);
                skipped.push(SkippedDocument {
                    name: document.name.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        // Step 3: derive sectors/location, map deadline -> application_deadline
        let derived = heuristic.derive(&details.description);
        programs.push(GrantProgram {
            program_name: details.program_name,
            eligibility_criteria: details.eligibility_criteria,
            funding_amount: details.funding_amount,
            application_deadline: details.deadline,
            sectors: derived.sectors,
            location: derived.location,
        });
    }

    info!(
        "Catalog build complete: {} program(s), {} skipped",
        programs.len(),
        skipped.len()
    );
    Ok(CatalogBuild { programs, skipped })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;

    use async_trait::async_trait;

    use super::*;
    use crate::catalog::heuristics::PresenceHeuristic;
    use crate::models::grant::ExtractedGrantDetails;
    use crate::store::DocumentPayload;

    /// Deterministic extractor: derives the record from the file name and
    /// fails for any name in `fail_names`.
    struct StubExtractor {
        fail_names: HashSet<String>,
        description: String,
    }

    impl StubExtractor {
        fn new() -> Self {
            Self {
                fail_names: HashSet::new(),
                description: "A grant for deserving businesses.".to_string(),
            }
        }

        fn failing_on(names: &[&str]) -> Self {
            Self {
                fail_names: names.iter().map(|n| n.to_string()).collect(),
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl GrantExtractor for StubExtractor {
        async fn extract(
            &self,
            document: &DocumentPayload,
        ) -> Result<ExtractedGrantDetails, AppError> {
            if self.fail_names.contains(&document.file_name) {
                return Err(AppError::Llm(format!(
                    "Grant extraction failed for {}: stub failure",
                    document.file_name
                )));
            }
            Ok(ExtractedGrantDetails {
                program_name: format!("Program {}", document.file_name),
                eligibility_criteria: "Registered SMEs".to_string(),
                funding_amount: "Up to RM500,000".to_string(),
                deadline: "31 December 2025".to_string(),
                description: self.description.clone(),
                application_process: "Apply online.".to_string(),
                contact_information: "grants@example.gov".to_string(),
            })
        }
    }

    fn make_store(files: &[&str]) -> (tempfile::TempDir, DocumentStore) {
        let dir = tempfile::tempdir().unwrap();
        for name in files {
            fs::write(dir.path().join(name), b"%PDF-stub").unwrap();
        }
        let store = DocumentStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_empty_store_builds_empty_catalog_without_error() {
        let (_dir, store) = make_store(&[]);
        let build = build_catalog(&store, &StubExtractor::new(), &PresenceHeuristic::new())
            .await
            .unwrap();

        assert!(build.programs.is_empty());
        assert!(build.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_non_pdf_files_never_reach_the_extractor() {
        let (_dir, store) = make_store(&["readme.txt"]);
        let build = build_catalog(&store, &StubExtractor::new(), &PresenceHeuristic::new())
            .await
            .unwrap();

        assert!(build.programs.is_empty());
    }

    #[tokio::test]
    async fn test_failed_document_is_skipped_and_the_rest_survive() {
        let (_dir, store) = make_store(&["a.pdf", "b.pdf", "c.pdf"]);
        let extractor = StubExtractor::failing_on(&["b.pdf"]);
        let build = build_catalog(&store, &extractor, &PresenceHeuristic::new())
            .await
            .unwrap();

        assert_eq!(build.programs.len(), 2);
        assert_eq!(build.skipped.len(), 1);
        assert_eq!(build.skipped[0].name, "b.pdf");
        assert!(build.skipped[0].reason.contains("stub failure"));
        assert!(build
            .programs
            .iter()
            .all(|p| p.program_name != "Program b.pdf"));
    }

    #[tokio::test]
    async fn test_unchanged_store_builds_identical_catalogs() {
        let (_dir, store) = make_store(&["a.pdf", "b.pdf"]);
        let extractor = StubExtractor::new();
        let heuristic = PresenceHeuristic::new();

        let first = build_catalog(&store, &extractor, &heuristic).await.unwrap();
        let second = build_catalog(&store, &extractor, &heuristic).await.unwrap();

        assert_eq!(first.programs, second.programs);
    }

    #[tokio::test]
    async fn test_catalog_record_maps_deadline_and_derives_fields() {
        let (_dir, store) = make_store(&["grant.pdf"]);
        let extractor = StubExtractor {
            fail_names: HashSet::new(),
            description: "Open to all industry sectors nationwide".to_string(),
        };
        let build = build_catalog(&store, &extractor, &PresenceHeuristic::new())
            .await
            .unwrap();

        let program = &build.programs[0];
        assert_eq!(program.program_name, "Program grant.pdf");
        assert_eq!(program.application_deadline, "31 December 2025");
        assert_eq!(program.sectors, "Extracted from description");
        assert_eq!(program.location, "Nationwide");
    }
}
