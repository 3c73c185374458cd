//! Sector and location derivation from extracted description text.
//!
//! The default heuristic is a presence check: it signals that a concept
//! appears in the description, not what its value is. That is a known
//! precision limitation, so the heuristic sits behind [`FieldHeuristic`]
//! and a real classifier can replace it without touching the catalog
//! builder.

use regex::Regex;

/// Marker value for a field whose concept was found in the description.
pub const EXTRACTED_FROM_DESCRIPTION: &str = "Extracted from description";
/// Fallback when the description carries no sector or industry signal.
pub const SECTORS_FALLBACK: &str = "Various";
/// Fallback when the description carries no location signal.
pub const LOCATION_FALLBACK: &str = "Nationwide";

/// Catalog fields derived from a grant description.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFields {
    pub sectors: String,
    pub location: String,
}

/// Derives the catalog `sectors` and `location` fields from free text.
///
/// Carried in `AppState` as `Arc<dyn FieldHeuristic>`.
pub trait FieldHeuristic: Send + Sync {
    fn derive(&self, description: &str) -> DerivedFields;
}

/// Default heuristic: case-insensitive keyword presence.
///
/// `sectors` triggers on "sector" or "industry"; `location` triggers on
/// "location", "state" or "city". Note that "nationwide" is NOT a
/// location trigger, so a description like "open to businesses
/// nationwide" still falls back to the Nationwide default.
pub struct PresenceHeuristic {
    sector_pattern: Regex,
    location_pattern: Regex,
}

impl PresenceHeuristic {
    pub fn new() -> Self {
        Self {
            sector_pattern: Regex::new(r"(?i)sector|industry").expect("sector pattern is valid"),
            location_pattern: Regex::new(r"(?i)location|state|city")
                .expect("location pattern is valid"),
        }
    }
}

impl Default for PresenceHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldHeuristic for PresenceHeuristic {
    fn derive(&self, description: &str) -> DerivedFields {
        let sectors = if self.sector_pattern.is_match(description) {
            EXTRACTED_FROM_DESCRIPTION
        } else {
            SECTORS_FALLBACK
        };
        let location = if self.location_pattern.is_match(description) {
            EXTRACTED_FROM_DESCRIPTION
        } else {
            LOCATION_FALLBACK
        };
        DerivedFields {
            sectors: sectors.to_string(),
            location: location.to_string(),
        }
    }
}
