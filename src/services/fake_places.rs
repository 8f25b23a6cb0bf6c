// src/services/fake_places.rs
// DOCUMENTATION: Scripted in-memory PlacesApi used by unit tests
// PURPOSE: Drive the searcher, aggregator, enricher and pipeline without network access

use crate::errors::PlacesError;
use crate::models::{Coordinate, PlaceDetails, PlaceResult, SearchCircle};
use crate::services::google_places_client::{NearbySearchPage, NearbySearchRequest, PlacesApi};
use std::collections::HashMap;
use std::sync::Mutex;

/// Outcome scripted for the first page of one circle
pub enum CircleScript {
    Page(NearbySearchPage),
    Fail(String),
}

/// Fake upstream
/// DOCUMENTATION: The n-th first-page request (no token) receives `circles[n]`;
/// requests carrying a token are answered from `token_pages`. Every request
/// is recorded for assertions.
#[derive(Default)]
pub struct FakePlacesApi {
    pub geocode_result: Option<Coordinate>,
    pub circles: Vec<CircleScript>,
    pub token_pages: HashMap<String, NearbySearchPage>,
    pub details: HashMap<String, PlaceDetails>,
    pub requests: Mutex<Vec<(SearchCircle, Option<String>)>>,
    pub details_requests: Mutex<Vec<String>>,
    first_pages_served: Mutex<usize>,
}

impl FakePlacesApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_geocode(mut self, location: Coordinate) -> Self {
        self.geocode_result = Some(location);
        self
    }

    pub fn with_circle(mut self, results: Vec<PlaceResult>, next_page_token: Option<&str>) -> Self {
        self.circles.push(CircleScript::Page(NearbySearchPage {
            results,
            next_page_token: next_page_token.map(str::to_string),
        }));
        self
    }

    pub fn with_failing_circle(mut self, message: &str) -> Self {
        self.circles.push(CircleScript::Fail(message.to_string()));
        self
    }

    pub fn with_token_page(
        mut self,
        token: &str,
        results: Vec<PlaceResult>,
        next_page_token: Option<&str>,
    ) -> Self {
        self.token_pages.insert(
            token.to_string(),
            NearbySearchPage {
                results,
                next_page_token: next_page_token.map(str::to_string),
            },
        );
        self
    }

    pub fn with_details(mut self, place_id: &str, details: PlaceDetails) -> Self {
        self.details.insert(place_id.to_string(), details);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl PlacesApi for FakePlacesApi {
    async fn geocode(&self, address: &str) -> Result<Coordinate, PlacesError> {
        self.geocode_result
            .ok_or_else(|| PlacesError::AddressNotFound(address.to_string()))
    }

    async fn nearby_search_page(
        &self,
        request: &NearbySearchRequest<'_>,
    ) -> Result<NearbySearchPage, PlacesError> {
        self.requests
            .lock()
            .unwrap()
            .push((request.circle, request.page_token.map(str::to_string)));

        if let Some(token) = request.page_token {
            return self
                .token_pages
                .get(token)
                .cloned()
                .ok_or_else(|| PlacesError::ExternalApiError(format!("unknown token {}", token)));
        }

        let index = {
            let mut served = self.first_pages_served.lock().unwrap();
            let index = *served;
            *served += 1;
            index
        };

        match self.circles.get(index) {
            Some(CircleScript::Page(page)) => Ok(page.clone()),
            Some(CircleScript::Fail(message)) => Err(PlacesError::ExternalApiError(message.clone())),
            None => Ok(NearbySearchPage::default()),
        }
    }

    async fn place_details(
        &self,
        place_id: &str,
        _fields: &[&str],
    ) -> Result<PlaceDetails, PlacesError> {
        self.details_requests
            .lock()
            .unwrap()
            .push(place_id.to_string());

        self.details
            .get(place_id)
            .cloned()
            .ok_or_else(|| PlacesError::DetailsFetchError(place_id.to_string()))
    }
}

/// Minimal place at `location`
pub fn place(id: &str, name: &str, location: Coordinate) -> PlaceResult {
    PlaceResult {
        place_id: id.to_string(),
        name: name.to_string(),
        location,
        vicinity: Some(format!("{} street", name)),
        formatted_address: None,
        phone: None,
        website: None,
        rating: Some(4.5),
        user_ratings_total: Some(10),
        business_status: Some("OPERATIONAL".to_string()),
        types: vec!["veterinary_care".to_string()],
    }
}
