use serde::{Deserialize, Serialize};

/// SME profile captured by the questionnaire.
///
/// `employee_count` and `business_age` are unsigned, so negative values are
/// rejected at deserialization; the remaining constraints are checked by
/// [`validate_profile`] before any match request runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmeProfile {
    pub business_type: String,
    pub industry: String,
    /// State or city the business operates from.
    pub location: String,
    /// Annual revenue in local currency.
    pub revenue: f64,
    pub employee_count: u32,
    /// Years in operation. Zero is valid for a newly registered business.
    pub business_age: u32,
    pub funding_stage: String,
    pub previous_funding_amount: f64,
    pub purpose_of_funding: String,
}

/// One field-level validation failure, serialized to the client as part of
/// a 422 response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Checks every questionnaire constraint and returns the failures in field
/// order. An empty list means the profile is valid.
pub fn validate_profile(profile: &SmeProfile) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if profile.business_type.trim().is_empty() {
        errors.push(FieldError {
            field: "business_type",
            message: "Business type is required.",
        });
    }
    if profile.industry.trim().is_empty() {
        errors.push(FieldError {
            field: "industry",
            message: "Industry is required.",
        });
    }
    if profile.location.trim().is_empty() {
        errors.push(FieldError {
            field: "location",
            message: "Location (e.g., state or city) is required.",
        });
    }
    if !profile.revenue.is_finite() || profile.revenue < 0.0 {
        errors.push(FieldError {
            field: "revenue",
            message: "Annual revenue must be a positive number.",
        });
    }
    if profile.employee_count < 1 {
        errors.push(FieldError {
            field: "employee_count",
            message: "Must have at least one employee.",
        });
    }
    if profile.funding_stage.trim().is_empty() {
        errors.push(FieldError {
            field: "funding_stage",
            message: "Funding stage is required.",
        });
    }
    if !profile.previous_funding_amount.is_finite() || profile.previous_funding_amount < 0.0 {
        errors.push(FieldError {
            field: "previous_funding_amount",
            message: "Previous funding amount must be a positive number.",
        });
    }
    if profile.purpose_of_funding.trim().is_empty() {
        errors.push(FieldError {
            field: "purpose_of_funding",
            message: "Please specify the purpose of funding.",
        });
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_profile() -> SmeProfile {
        SmeProfile {
            business_type: "Technology".to_string(),
            industry: "Software".to_string(),
            location: "Kuala Lumpur".to_string(),
            revenue: 500_000.0,
            employee_count: 10,
            business_age: 2,
            funding_stage: "Seed".to_string(),
            previous_funding_amount: 0.0,
            purpose_of_funding: "Product Development".to_string(),
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(validate_profile(&make_profile()).is_empty());
    }

    #[test]
    fn test_zero_business_age_is_valid() {
        let mut profile = make_profile();
        profile.business_age = 0;
        assert!(validate_profile(&profile).is_empty());
    }

    #[test]
    fn test_whitespace_only_text_field_fails() {
        let mut profile = make_profile();
        profile.industry = "   ".to_string();

        let errors = validate_profile(&profile);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "industry");
        assert_eq!(errors[0].message, "Industry is required.");
    }

    #[test]
    fn test_negative_revenue_fails() {
        let mut profile = make_profile();
        profile.revenue = -1.0;

        let errors = validate_profile(&profile);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "revenue");
    }

    #[test]
    fn test_nan_revenue_fails() {
        let mut profile = make_profile();
        profile.revenue = f64::NAN;

        assert_eq!(validate_profile(&profile).len(), 1);
    }

    #[test]
    fn test_zero_employees_fails() {
        let mut profile = make_profile();
        profile.employee_count = 0;

        let errors = validate_profile(&profile);
        assert_eq!(errors[0].field, "employee_count");
        assert_eq!(errors[0].message, "Must have at least one employee.");
    }

    #[test]
    fn test_multiple_failures_collected_in_field_order() {
        let mut profile = make_profile();
        profile.business_type = String::new();
        profile.employee_count = 0;
        profile.purpose_of_funding = String::new();

        let fields: Vec<&str> = validate_profile(&profile)
            .iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(
            fields,
            vec!["business_type", "employee_count", "purpose_of_funding"]
        );
    }

    #[test]
    fn test_profile_uses_snake_case_json() {
        let json = serde_json::to_value(make_profile()).unwrap();
        assert!(json.get("employee_count").is_some());
        assert!(json.get("purpose_of_funding").is_some());
        assert!(json.get("employeeCount").is_none());
    }

    #[test]
    fn test_negative_employee_count_rejected_at_deserialization() {
        let json = r#"{
            "business_type": "Technology", "industry": "Software",
            "location": "Kuala Lumpur", "revenue": 500000,
            "employee_count": -3, "business_age": 2,
            "funding_stage": "Seed", "previous_funding_amount": 0,
            "purpose_of_funding": "Product Development"
        }"#;

        assert!(serde_json::from_str::<SmeProfile>(json).is_err());
    }
}
