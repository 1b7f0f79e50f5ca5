use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// House numbers come back as integers from the Benelux endpoint but callers
/// may also send them as strings, so both shapes are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HouseNumber {
    Number(serde_json::Number),
    Text(String),
}

/// A field of the wrong type is read as absent instead of failing the record
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// One address record returned by PostNL for a lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Candidate {
    #[serde(deserialize_with = "lenient")]
    pub mailability_score: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub result_percentage: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub street_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub city_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub postal_code: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub house_number: Option<HouseNumber>,
    #[serde(deserialize_with = "lenient")]
    pub house_number_addition: Option<String>,
}

impl Candidate {
    /// Decode a provider record; anything that is not an object has no fields
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::deserialize(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Deliverability confidence, 0 when the provider omitted it
    pub fn mailability_score(&self) -> f64 {
        self.mailability_score.unwrap_or(0.0)
    }

    /// Match quality against the submitted query, 0 when the provider omitted it
    pub fn result_percentage(&self) -> f64 {
        self.result_percentage.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_benelux_record() {
        let candidate: Candidate = serde_json::from_value(json!({
            "cityName": "AMSTERDAM",
            "countryName": "Nederland",
            "houseNumber": 1,
            "mailabilityScore": 100,
            "postalCode": "1012JS",
            "resultPercentage": 100,
            "streetName": "Dam"
        }))
        .unwrap();

        assert_eq!(candidate.city_name.as_deref(), Some("AMSTERDAM"));
        assert_eq!(candidate.house_number, Some(HouseNumber::Number(1.into())));
        assert_eq!(candidate.house_number_addition, None);
        assert_eq!(candidate.mailability_score(), 100.0);
    }

    #[test]
    fn test_missing_scores_default_to_zero() {
        let candidate: Candidate = serde_json::from_value(json!({
            "streetName": "Main St",
            "mailabilityScore": null
        }))
        .unwrap();

        assert_eq!(candidate.mailability_score(), 0.0);
        assert_eq!(candidate.result_percentage(), 0.0);
    }

    #[test]
    fn test_wrong_typed_fields_are_absent() {
        let candidate = Candidate::from_value(&json!({
            "mailabilityScore": "85",
            "resultPercentage": 95,
            "streetName": 5,
            "houseNumber": true,
            "houseNumberAddition": ["A"]
        }));

        assert_eq!(candidate.mailability_score, None);
        assert_eq!(candidate.result_percentage, Some(95.0));
        assert_eq!(candidate.street_name, None);
        assert_eq!(candidate.house_number, None);
        assert_eq!(candidate.house_number_addition, None);
    }

    #[test]
    fn test_non_object_record_has_no_fields() {
        assert_eq!(Candidate::from_value(&json!("x")), Candidate::default());
        assert_eq!(Candidate::from_value(&json!(42)), Candidate::default());
        assert_eq!(Candidate::from_value(&json!([1, 2])), Candidate::default());
    }

    #[test]
    fn test_house_number_as_text() {
        let candidate: Candidate = serde_json::from_value(json!({ "houseNumber": "12" })).unwrap();
        assert_eq!(candidate.house_number, Some(HouseNumber::Text("12".to_string())));
    }
}
