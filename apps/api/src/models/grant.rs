use serde::{Deserialize, Serialize};

/// Placeholder for raw-document fields that cannot be recovered from a
/// ranked match. Shown on the results view.
pub const REFER_TO_DOCUMENT: &str = "Please refer to the original document.";

/// Structured details extracted from a single grant program document.
///
/// Every field is required and non-empty. The model is instructed to fill
/// ambiguous fields with its best reading (e.g. "Not specified in the
/// document") rather than omit them, and deserialization rejects any
/// response that leaves one out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedGrantDetails {
    pub program_name: String,
    pub eligibility_criteria: String,
    /// Human-readable text exactly as the document states it. Never a
    /// normalized currency value.
    pub funding_amount: String,
    /// Human-readable text exactly as the document states it. Never a
    /// normalized date.
    pub deadline: String,
    /// Brief summary of the program. Input to the sector/location
    /// heuristic.
    pub description: String,
    pub application_process: String,
    pub contact_information: String,
}

/// One record of the grant catalog handed to the Matching Service.
///
/// Built from [`ExtractedGrantDetails`] by the catalog builder: the raw
/// fields carry over verbatim (`deadline` becomes `application_deadline`)
/// and `sectors` / `location` are derived from the description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantProgram {
    pub program_name: String,
    pub eligibility_criteria: String,
    pub funding_amount: String,
    pub application_deadline: String,
    pub sectors: String,
    pub location: String,
}

/// A single ranked match returned by the Matching Service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedGrant {
    pub program_name: String,
    /// Relevance score, nominally 0 to 100. Passed through exactly as the
    /// model returned it; out-of-range values are not clamped.
    pub match_score: f64,
    pub eligibility: String,
    pub funding_amount: String,
    pub application_deadline: String,
    pub sectors: String,
    pub location: String,
}

impl MatchedGrant {
    /// Reconstructs a raw-form details record for the results view.
    ///
    /// Only the fields a match carries can be recovered; the rest point the
    /// reader at the source document.
    pub fn to_details(&self) -> ExtractedGrantDetails {
        ExtractedGrantDetails {
            program_name: self.program_name.clone(),
            eligibility_criteria: self.eligibility.clone(),
            funding_amount: self.funding_amount.clone(),
            deadline: self.application_deadline.clone(),
            description: REFER_TO_DOCUMENT.to_string(),
            application_process: REFER_TO_DOCUMENT.to_string(),
            contact_information: REFER_TO_DOCUMENT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_match(name: &str, score: f64) -> MatchedGrant {
        MatchedGrant {
            program_name: name.to_string(),
            match_score: score,
            eligibility: "Registered SMEs".to_string(),
            funding_amount: "Up to RM500,000".to_string(),
            application_deadline: "31 December 2025".to_string(),
            sectors: "Various".to_string(),
            location: "Nationwide".to_string(),
        }
    }

    #[test]
    fn test_extracted_details_full_deserializes() {
        let json = r#"{
            "program_name": "SME Digitalisation Grant",
            "eligibility_criteria": "At least 60% local ownership",
            "funding_amount": "Up to RM5,000",
            "deadline": "Open all year",
            "description": "Matching grant for digitalisation of operations.",
            "application_process": "Apply through appointed banks.",
            "contact_information": "info@example.gov.my"
        }"#;

        let details: ExtractedGrantDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.program_name, "SME Digitalisation Grant");
        assert_eq!(details.deadline, "Open all year");
    }

    #[test]
    fn test_extracted_details_rejects_missing_field() {
        // No contact_information. The extraction schema has no optional
        // fields, so this must fail to parse.
        let json = r#"{
            "program_name": "SME Digitalisation Grant",
            "eligibility_criteria": "At least 60% local ownership",
            "funding_amount": "Up to RM5,000",
            "deadline": "Open all year",
            "description": "Matching grant.",
            "application_process": "Apply through appointed banks."
        }"#;

        assert!(serde_json::from_str::<ExtractedGrantDetails>(json).is_err());
    }

    #[test]
    fn test_matched_grant_accepts_fractional_and_oversized_scores() {
        let json = r#"[
            {"program_name": "A", "match_score": 87.5, "eligibility": "e",
             "funding_amount": "f", "application_deadline": "d",
             "sectors": "s", "location": "l"},
            {"program_name": "B", "match_score": 120, "eligibility": "e",
             "funding_amount": "f", "application_deadline": "d",
             "sectors": "s", "location": "l"}
        ]"#;

        let matches: Vec<MatchedGrant> = serde_json::from_str(json).unwrap();
        assert_eq!(matches[0].match_score, 87.5);
        // Out-of-range scores are preserved, not clamped.
        assert_eq!(matches[1].match_score, 120.0);
    }

    #[test]
    fn test_to_details_maps_match_fields_and_placeholders() {
        let details = make_match("Export Acceleration Fund", 91.0).to_details();

        assert_eq!(details.program_name, "Export Acceleration Fund");
        assert_eq!(details.eligibility_criteria, "Registered SMEs");
        assert_eq!(details.deadline, "31 December 2025");
        assert_eq!(details.description, REFER_TO_DOCUMENT);
        assert_eq!(details.application_process, REFER_TO_DOCUMENT);
        assert_eq!(details.contact_information, REFER_TO_DOCUMENT);
    }
}
