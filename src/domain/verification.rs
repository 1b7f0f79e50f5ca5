use serde_json::{Map, Number, Value};
use tracing::debug;

use super::ValidationError;
use crate::models::{AddressQuery, BestMatch, Candidate, VerificationResponse};

pub const DEFAULT_COUNTRY_ISO: &str = "NL";

// 2^53, above which f64 no longer holds every integer
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Minimum mailability score for an address to count as deliverable
pub const MIN_MAILABILITY_SCORE: f64 = 80.0;

/// Minimum match percentage for the best candidate to count as the submitted address
pub const MIN_RESULT_PERCENTAGE: f64 = 90.0;

/// Parse a request body into a JSON value; an absent or blank body is an empty object
pub fn parse_body(body: &[u8]) -> Result<Value, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body)
}

/// Read a field as text, treating `null`, `false`, `0` and non-scalar values as absent
fn field_text(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(number_text(n)),
        _ => None,
    }
}

/// Render a number the way it reads in a form field: `1.0` and `1e2` become `1` and `100`
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

/// Trimmed field value, `None` when absent or blank
fn trimmed_field(body: &Value, key: &str) -> Option<String> {
    field_text(body, key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Postcodes are compared without any whitespace and in upper case
pub fn normalize_postal_code(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Extract and normalize the address fields from a parsed request body
///
/// Fails before any network activity when the postcode or house number is
/// missing. A body that is not a JSON object carries no fields at all.
pub fn extract_query(body: &Value) -> Result<AddressQuery, ValidationError> {
    let postal_code = field_text(body, "postalCode")
        .map(|v| normalize_postal_code(&v))
        .filter(|v| !v.is_empty());
    let house_number = trimmed_field(body, "houseNumber");

    let (postal_code, house_number) = match (postal_code, house_number) {
        (Some(p), Some(h)) => (p, h),
        _ => return Err(ValidationError::MissingRequiredFields),
    };

    let country_iso = trimmed_field(body, "countryIso")
        .map(|v| v.to_uppercase())
        .unwrap_or_else(|| DEFAULT_COUNTRY_ISO.to_string());

    Ok(AddressQuery {
        country_iso,
        postal_code,
        house_number,
        city_name: trimmed_field(body, "cityName"),
        street_name: trimmed_field(body, "streetName"),
        house_number_addition: trimmed_field(body, "houseNumberAddition"),
    })
}

/// Whether a candidate is confident enough to be reported as a valid address
pub fn is_deliverable(candidate: &Candidate) -> bool {
    let score = candidate.mailability_score();
    let percentage = candidate.result_percentage();

    score >= MIN_MAILABILITY_SCORE && percentage >= MIN_RESULT_PERCENTAGE
}

/// `null`, `false`, `0` and `""` stand for "no record" in the candidate list
fn is_empty_record(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Reduce the upstream body to a verdict based on its first candidate
///
/// Anything other than a JSON array (including a body that failed to parse)
/// is treated as an empty candidate list.
pub fn verify_candidates(data: Option<&Value>) -> VerificationResponse {
    let first = match data {
        Some(Value::Array(items)) => items.first().filter(|v| !is_empty_record(v)),
        _ => None,
    };

    let Some(first) = first else {
        return VerificationResponse::no_match();
    };

    let best = Candidate::from_value(first);
    let valid = is_deliverable(&best);

    debug!(
        mailability_score = best.mailability_score(),
        result_percentage = best.result_percentage(),
        valid,
        "Evaluated best candidate"
    );

    VerificationResponse::Matched {
        valid,
        raw_valid: true,
        best: BestMatch::from(best),
    }
}
