// src/models/search.rs
// DOCUMENTATION: Search request/response models
// PURPOSE: Inputs of a search run and the JSON shapes exchanged with the web form

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::services::distance::miles_to_meters;

/// Input of one search run
/// DOCUMENTATION: Shared by the CLI and the HTTP handler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-form street address to geocode
    pub address: String,
    /// Requested radius around the address, in meters
    pub radius_m: f64,
    /// Google place type (e.g. "veterinary_care")
    pub category: String,
}

/// Body posted by the search form
/// DOCUMENTATION: `distance` is in miles and may arrive as a number or as the
/// raw string value of an input field
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchFormRequest {
    #[validate(length(min = 1, max = 512))]
    pub address: String,

    #[serde(deserialize_with = "number_or_string")]
    #[validate(range(min = 0.0))]
    pub distance: f64,

    #[validate(length(min = 1, max = 64))]
    pub place_type: String,
}

impl SearchFormRequest {
    /// Convert the form (miles) into a run query (meters)
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            address: self.address.trim().to_string(),
            radius_m: miles_to_meters(self.distance).trunc(),
            category: self.place_type.trim().to_string(),
        }
    }
}

/// Reply to a completed search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchFormResponse {
    pub success: bool,
    pub message: String,
    /// File name (no directory) to pass to `/download/{filename}`
    pub output_file: String,
    /// Unique places written to the file
    pub total_places: usize,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    let distance = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n,
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid distance '{}': {}", s, e)))?,
    };

    // "NaN" and "inf" parse as f64 but would slip past the range check
    if !distance.is_finite() {
        return Err(serde::de::Error::custom(format!(
            "distance must be a finite number, got {}",
            distance
        )));
    }
    Ok(distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_from_string() {
        let req: SearchFormRequest = serde_json::from_str(
            r#"{"address": "10850 SW 93rd St, Miami, FL", "distance": "10", "place_type": "veterinary_care"}"#,
        )
        .unwrap();
        assert_eq!(req.distance, 10.0);
    }

    #[test]
    fn test_distance_from_number() {
        let req: SearchFormRequest = serde_json::from_str(
            r#"{"address": "Miami", "distance": 2.5, "place_type": "veterinary_care"}"#,
        )
        .unwrap();
        assert_eq!(req.distance, 2.5);
    }

    #[test]
    fn test_distance_rejects_garbage() {
        let result: Result<SearchFormRequest, _> = serde_json::from_str(
            r#"{"address": "Miami", "distance": "ten", "place_type": "veterinary_care"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_distance_rejects_non_finite() {
        for raw in [r#""NaN""#, r#""inf""#, r#""-infinity""#] {
            let body = format!(
                r#"{{"address": "Miami", "distance": {}, "place_type": "veterinary_care"}}"#,
                raw
            );
            let result: Result<SearchFormRequest, _> = serde_json::from_str(&body);
            assert!(result.is_err(), "accepted distance {}", raw);
        }
    }

    #[test]
    fn test_to_query_converts_miles() {
        let req = SearchFormRequest {
            address: "  Miami  ".to_string(),
            distance: 10.0,
            place_type: "veterinary_care".to_string(),
        };

        let query = req.to_query();
        assert_eq!(query.address, "Miami");
        assert_eq!(query.radius_m, 16093.0);
        assert_eq!(query.category, "veterinary_care");
    }

    #[test]
    fn test_validation() {
        let req = SearchFormRequest {
            address: String::new(),
            distance: -1.0,
            place_type: "veterinary_care".to_string(),
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("address"));
        assert!(fields.contains_key("distance"));
    }
}
