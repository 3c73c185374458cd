// Grant Catalog Builder — enumerates the document store, extracts every
// PDF through the extraction service, and derives the catalog-only fields.
// The catalog is rebuilt from scratch on every match request; there is no
// cache to invalidate.

pub mod builder;
pub mod handlers;
pub mod heuristics;

// Re-export the public API consumed by the match pipeline.
pub use builder::{build_catalog, SkippedDocument};
pub use heuristics::{FieldHeuristic, PresenceHeuristic};
