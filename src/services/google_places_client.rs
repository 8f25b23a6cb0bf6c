// src/services/google_places_client.rs
// DOCUMENTATION: Google Maps Platform client
// PURPOSE: Geocoding, Nearby Search and Place Details behind the PlacesApi trait

use crate::config::Config;
use crate::errors::PlacesError;
use crate::models::{Coordinate, OpeningHours, PlaceDetails, PlaceResult, PlaceReview, SearchCircle};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Fields requested when enriching search results
pub const ENRICHMENT_FIELDS: &[&str] = &[
    "name",
    "formatted_address",
    "formatted_phone_number",
    "website",
    "rating",
    "user_ratings_total",
    "opening_hours",
    "reviews",
];

/// Fields requested by the single-place details lookup
pub const FULL_DETAILS_FIELDS: &[&str] = &[
    "name",
    "formatted_address",
    "formatted_phone_number",
    "website",
    "rating",
    "user_ratings_total",
    "opening_hours",
    "reviews",
    "photos",
    "price_level",
    "url",
];

/// One Nearby Search request
#[derive(Debug, Clone, PartialEq)]
pub struct NearbySearchRequest<'a> {
    pub circle: SearchCircle,
    /// Google place type filter (e.g. "veterinary_care")
    pub category: &'a str,
    /// Continuation token from the previous page
    pub page_token: Option<&'a str>,
}

/// One page of Nearby Search results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NearbySearchPage {
    pub results: Vec<PlaceResult>,
    /// Present when more results exist beyond this page
    pub next_page_token: Option<String>,
}

/// Upstream places service
/// DOCUMENTATION: The three operations the search consumes. Implemented by
/// GooglePlacesClient; tests substitute an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait PlacesApi {
    /// Resolve a free-form address to coordinates
    async fn geocode(&self, address: &str) -> Result<Coordinate, PlacesError>;

    /// Fetch one page of places around a circle
    async fn nearby_search_page(
        &self,
        request: &NearbySearchRequest<'_>,
    ) -> Result<NearbySearchPage, PlacesError>;

    /// Fetch enrichment fields for one place
    async fn place_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> Result<PlaceDetails, PlacesError>;
}

/// Google Maps Platform API client
/// DOCUMENTATION: Handles authentication and API calls to Google web services
pub struct GooglePlacesClient {
    /// HTTP client for making requests
    client: Client,
    /// Google Maps API key
    api_key: String,
    /// Base URL (e.g. https://maps.googleapis.com/maps/api)
    base_url: String,
}

/// Response from Google Places Nearby Search
#[derive(Debug, Deserialize)]
struct GooglePlacesResponse {
    #[serde(default)]
    results: Vec<GooglePlace>,
    status: String,
    next_page_token: Option<String>,
    error_message: Option<String>,
}

/// Individual place from Nearby Search
#[derive(Debug, Clone, Deserialize)]
struct GooglePlace {
    place_id: String,
    #[serde(default)]
    name: String,
    geometry: GoogleGeometry,
    vicinity: Option<String>,
    formatted_address: Option<String>,
    formatted_phone_number: Option<String>,
    rating: Option<f32>,
    user_ratings_total: Option<u32>,
    business_status: Option<String>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct GoogleGeometry {
    location: Coordinate,
}

/// Response from the Geocoding API
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    status: String,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: GoogleGeometry,
    formatted_address: Option<String>,
}

/// Response from Place Details
#[derive(Debug, Deserialize)]
struct DetailsResponse {
    result: Option<GooglePlaceDetails>,
    status: String,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GooglePlaceDetails {
    name: Option<String>,
    formatted_address: Option<String>,
    formatted_phone_number: Option<String>,
    international_phone_number: Option<String>,
    website: Option<String>,
    rating: Option<f32>,
    user_ratings_total: Option<u32>,
    price_level: Option<u8>,
    url: Option<String>,
    opening_hours: Option<GoogleOpeningHours>,
    #[serde(default)]
    reviews: Vec<PlaceReview>,
    #[serde(default)]
    photos: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GoogleOpeningHours {
    open_now: Option<bool>,
    #[serde(default)]
    weekday_text: Vec<String>,
}

impl GooglePlace {
    fn into_place_result(self) -> PlaceResult {
        PlaceResult {
            place_id: self.place_id,
            name: self.name,
            location: self.geometry.location,
            vicinity: self.vicinity,
            formatted_address: self.formatted_address,
            phone: self.formatted_phone_number,
            website: None,
            rating: self.rating,
            user_ratings_total: self.user_ratings_total,
            business_status: self.business_status,
            types: self.types,
        }
    }
}

impl GooglePlaceDetails {
    fn into_place_details(self) -> PlaceDetails {
        PlaceDetails {
            name: self.name,
            formatted_address: self.formatted_address,
            formatted_phone_number: self.formatted_phone_number,
            international_phone_number: self.international_phone_number,
            website: self.website,
            rating: self.rating,
            user_ratings_total: self.user_ratings_total,
            price_level: self.price_level,
            url: self.url,
            opening_hours: self.opening_hours.map(|hours| OpeningHours {
                open_now: hours.open_now,
                weekday_text: hours.weekday_text,
            }),
            reviews: self.reviews,
            photo_count: self.photos.len(),
        }
    }
}

impl GooglePlacesClient {
    /// Create new client against an arbitrary base URL
    pub fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create client from application configuration
    pub fn from_config(config: &Config) -> Result<Self, PlacesError> {
        if config.google_maps_api_key.is_empty() {
            return Err(PlacesError::Configuration(
                "GOOGLE_MAPS_API_KEY not configured".to_string(),
            ));
        }

        Ok(Self::with_base_url(
            config.google_maps_api_key.clone(),
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        ))
    }

    /// GET a Maps web service endpoint and decode its JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, PlacesError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                log::error!("Google API request to {} failed: {}", path, e);
                PlacesError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Google API error {} on {}: {}", status, path, body);
            return Err(PlacesError::ExternalApiError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        response.json::<T>().await.map_err(|e| {
            log::error!("Failed to parse Google API response from {}: {}", path, e);
            PlacesError::ExternalApiError(format!("Parse error: {}", e))
        })
    }
}

/// Map an API-level status to a result
/// DOCUMENTATION: Google answers HTTP 200 even for failures; the real outcome
/// is in the `status` field
fn check_status(status: &str, error_message: Option<String>) -> Result<(), PlacesError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        "OVER_QUERY_LIMIT" => {
            log::error!("Google API quota exceeded");
            Err(PlacesError::RateLimitExceeded)
        }
        "REQUEST_DENIED" | "INVALID_REQUEST" => {
            let msg = error_message.unwrap_or_else(|| format!("{} (no message)", status));
            log::error!("Google API request rejected: {}", msg);
            Err(PlacesError::ExternalApiError(msg))
        }
        other => {
            let msg = error_message.unwrap_or_else(|| format!("Unknown status: {}", other));
            log::error!("Google API unexpected status: {}", msg);
            Err(PlacesError::ExternalApiError(msg))
        }
    }
}

fn geocode_location(address: &str, response: GeocodeResponse) -> Result<Coordinate, PlacesError> {
    if response.status == "ZERO_RESULTS" {
        return Err(PlacesError::AddressNotFound(address.to_string()));
    }
    check_status(&response.status, response.error_message)?;

    let first = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| PlacesError::AddressNotFound(address.to_string()))?;

    log::info!(
        "Coordinates found for {}: {}, {}",
        first.formatted_address.as_deref().unwrap_or(address),
        first.geometry.location.lat,
        first.geometry.location.lng
    );
    Ok(first.geometry.location)
}

fn nearby_page(response: GooglePlacesResponse) -> Result<NearbySearchPage, PlacesError> {
    check_status(&response.status, response.error_message)?;

    Ok(NearbySearchPage {
        results: response
            .results
            .into_iter()
            .map(GooglePlace::into_place_result)
            .collect(),
        next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
    })
}

fn details_result(place_id: &str, response: DetailsResponse) -> Result<PlaceDetails, PlacesError> {
    check_status(&response.status, response.error_message)
        .map_err(|e| PlacesError::DetailsFetchError(format!("{}: {}", place_id, e)))?;

    response
        .result
        .map(GooglePlaceDetails::into_place_details)
        .ok_or_else(|| PlacesError::DetailsFetchError(format!("{}: empty result", place_id)))
}

impl PlacesApi for GooglePlacesClient {
    async fn geocode(&self, address: &str) -> Result<Coordinate, PlacesError> {
        log::info!("Geocoding address: {}", address);

        let response: GeocodeResponse = self
            .get_json("geocode/json", &[("address", address.to_string())])
            .await?;

        geocode_location(address, response)
    }

    async fn nearby_search_page(
        &self,
        request: &NearbySearchRequest<'_>,
    ) -> Result<NearbySearchPage, PlacesError> {
        let mut params = vec![
            ("location", request.circle.center.to_query_param()),
            ("radius", request.circle.radius_m.to_string()),
            ("type", request.category.to_string()),
        ];
        if let Some(token) = request.page_token {
            params.push(("pagetoken", token.to_string()));
        }

        log::debug!(
            "Google Places nearby search: location={}, radius={}, type={}, paged={}",
            request.circle.center.to_query_param(),
            request.circle.radius_m,
            request.category,
            request.page_token.is_some()
        );

        let response: GooglePlacesResponse =
            self.get_json("place/nearbysearch/json", &params).await?;

        nearby_page(response)
    }

    async fn place_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> Result<PlaceDetails, PlacesError> {
        log::debug!("Google Places details lookup: place_id={}", place_id);

        let params = [
            ("place_id", place_id.to_string()),
            ("fields", fields.join(",")),
        ];

        let response: DetailsResponse = self
            .get_json("place/details/json", &params)
            .await
            .map_err(|e| PlacesError::DetailsFetchError(format!("{}: {}", place_id, e)))?;

        details_result(place_id, response)
    }
}
