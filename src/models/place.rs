// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Internal place record produced by the search and consumed by the exporter

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A point of interest found by a Nearby Search
/// DOCUMENTATION: Identity is `place_id`; every other field may differ slightly
/// between two queries returning the same place. The aggregator keeps the
/// first copy it sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    /// Google's stable place identifier (deduplication key)
    pub place_id: String,

    /// Place name
    pub name: String,

    /// Reported location
    pub location: Coordinate,

    /// Short address from Nearby Search
    pub vicinity: Option<String>,

    /// Full address (from Place Details)
    pub formatted_address: Option<String>,

    /// Local phone number (from Place Details)
    pub phone: Option<String>,

    /// Website (from Place Details)
    pub website: Option<String>,

    /// Rating (0-5)
    pub rating: Option<f32>,

    /// Number of user ratings
    pub user_ratings_total: Option<u32>,

    /// OPERATIONAL, CLOSED_TEMPORARILY, CLOSED_PERMANENTLY
    pub business_status: Option<String>,

    /// Category tags (e.g. ["veterinary_care", "point_of_interest"])
    #[serde(default)]
    pub types: Vec<String>,
}

impl PlaceResult {
    /// Address shown in listings and exports
    /// DOCUMENTATION: Prefers the Nearby Search vicinity, then the detailed address
    pub fn display_address(&self) -> Option<&str> {
        self.vicinity
            .as_deref()
            .or(self.formatted_address.as_deref())
    }

    /// Merge enrichment fields into this record
    /// DOCUMENTATION: Only fields the details response actually carries overwrite
    /// the search copy; identity and location never change.
    pub fn apply_details(&mut self, details: &PlaceDetails) {
        if let Some(phone) = details
            .formatted_phone_number
            .as_ref()
            .or(details.international_phone_number.as_ref())
        {
            self.phone = Some(phone.clone());
        }
        if details.website.is_some() {
            self.website = details.website.clone();
        }
        if details.formatted_address.is_some() {
            self.formatted_address = details.formatted_address.clone();
        }
        if details.rating.is_some() {
            self.rating = details.rating;
        }
        if details.user_ratings_total.is_some() {
            self.user_ratings_total = details.user_ratings_total;
        }
    }
}

/// Enrichment record returned by Place Details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub international_phone_number: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f32>,
    pub user_ratings_total: Option<u32>,
    /// Price level (0-4: free to very expensive)
    pub price_level: Option<u8>,
    /// Google Maps URL
    pub url: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub reviews: Vec<PlaceReview>,
    /// Number of photos attached to the place
    #[serde(default)]
    pub photo_count: usize,
}

/// Opening hours block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpeningHours {
    /// Whether place is currently open
    pub open_now: Option<bool>,
    /// One human-readable line per weekday
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

/// User review from Place Details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceReview {
    pub author_name: Option<String>,
    /// Rating (1-5)
    pub rating: Option<u8>,
    pub text: Option<String>,
    /// Unix timestamp
    pub time: Option<i64>,
}
