use serde::{Deserialize, Serialize};

use super::candidate::{Candidate, HouseNumber};

/// Best-match address fields returned to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestMatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_number: Option<HouseNumber>,
    pub house_number_addition: String,
}

impl From<Candidate> for BestMatch {
    fn from(candidate: Candidate) -> Self {
        Self {
            street: candidate.street_name,
            city: candidate.city_name,
            postal_code: candidate.postal_code,
            house_number: candidate.house_number,
            house_number_addition: candidate.house_number_addition.unwrap_or_default(),
        }
    }
}

/// Response body for a successful upstream lookup
///
/// Serializes to either `{"valid":false,"results":[]}` or
/// `{"valid":..,"rawValid":true,"best":{..}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerificationResponse {
    #[serde(rename_all = "camelCase")]
    Matched {
        valid: bool,
        raw_valid: bool,
        best: BestMatch,
    },
    NoMatch {
        valid: bool,
        results: Vec<serde_json::Value>,
    },
}

impl VerificationResponse {
    pub fn no_match() -> Self {
        Self::NoMatch {
            valid: false,
            results: Vec::new(),
        }
    }
}
