// src/services/search_service.rs
// DOCUMENTATION: End-to-end search pipeline
// PURPOSE: Geocode an address, search the grid, enrich, and export the CSV

use crate::config::SearchSettings;
use crate::errors::PlacesError;
use crate::models::{Coordinate, SearchQuery};
use crate::services::aggregator::Aggregator;
use crate::services::enrichment::Enricher;
use crate::services::exporter::{Exporter, RankedPlace};
use crate::services::google_places_client::PlacesApi;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Search statistics
/// DOCUMENTATION: Tracks results of one search run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchStats {
    /// Category that was searched
    pub category: String,
    /// Sub-search circles generated for the radius
    pub circles_planned: u32,
    /// Circles whose search completed
    pub circles_searched: u32,
    /// Circles skipped after an upstream failure
    pub circles_failed: u32,
    /// Nearby Search pages fetched
    pub pages_fetched: u32,
    /// Raw results returned by the upstream, duplicates included
    pub places_retrieved: u32,
    /// Unique places within the radius
    pub unique_places: u32,
    /// Results dropped because the id was already accepted
    pub duplicates_skipped: u32,
    /// Results dropped for lying outside the requested radius
    pub outside_radius: u32,
    /// Places updated from Place Details
    pub details_enriched: u32,
    /// Places kept as returned by search
    pub details_failed: u32,
    /// Error messages encountered
    pub errors: Vec<String>,
    /// Total run duration in seconds
    pub duration_seconds: u64,
    /// Timestamp when the run started
    pub started_at: String,
    /// Timestamp when the run completed
    pub completed_at: Option<String>,
}

impl SearchStats {
    pub fn new(category: String) -> Self {
        Self {
            category,
            circles_planned: 0,
            circles_searched: 0,
            circles_failed: 0,
            pages_fetched: 0,
            places_retrieved: 0,
            unique_places: 0,
            duplicates_skipped: 0,
            outside_radius: 0,
            details_enriched: 0,
            details_failed: 0,
            errors: Vec::new(),
            duration_seconds: 0,
            started_at: Utc::now().to_rfc3339(),
            completed_at: None,
        }
    }

    /// Mark the run as completed
    pub fn complete(&mut self, duration: u64) {
        self.duration_seconds = duration;
        self.completed_at = Some(Utc::now().to_rfc3339());
    }
}

/// Result of a full run
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Geocoded search center
    pub origin: Coordinate,
    /// Places sorted closest first
    pub places: Vec<RankedPlace>,
    /// CSV file written
    pub output_path: PathBuf,
    pub stats: SearchStats,
}

pub struct SearchService;

impl SearchService {
    /// Run a complete search
    /// DOCUMENTATION: Shared by the web form and the command-line tool
    ///
    /// Process:
    /// 1. Geocode the address (failure aborts the run)
    /// 2. Search every grid circle and dedupe
    /// 3. Optionally enrich each place with details
    /// 4. Sort by distance and write the CSV (failure aborts the run)
    ///
    /// An empty result still produces a header-only file.
    pub async fn run<A: PlacesApi>(
        api: &A,
        query: &SearchQuery,
        settings: &SearchSettings,
        output_dir: &Path,
    ) -> Result<SearchOutcome, PlacesError> {
        if !query.radius_m.is_finite() || query.radius_m < 0.0 {
            return Err(PlacesError::InvalidInput(format!(
                "radius must be a finite number >= 0, got {}",
                query.radius_m
            )));
        }

        let start_time = Instant::now();
        let mut stats = SearchStats::new(query.category.clone());

        log::info!("Geocoding address: {}", query.address);
        let origin = api.geocode(&query.address).await?;
        log::info!("Found coordinates: {}, {}", origin.lat, origin.lng);

        let mut results = Aggregator::find_all(
            api,
            origin,
            query.radius_m,
            &query.category,
            settings,
            &mut stats,
        )
        .await;

        if settings.enrich_details && !results.is_empty() {
            results = Enricher::enrich_all(api, results, settings, &mut stats).await;
        }

        let places = Exporter::rank_by_distance(results, origin);
        let output_path = Exporter::write_ranked(&places, &query.category, output_dir)?;

        stats.complete(start_time.elapsed().as_secs());

        log::info!(
            "Search completed for {}: {} places, {} circles failed, in {}s",
            query.category,
            places.len(),
            stats.circles_failed,
            stats.duration_seconds
        );

        Ok(SearchOutcome {
            origin,
            places,
            output_path,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlaceDetails;
    use crate::services::exporter::CSV_HEADER;
    use crate::services::fake_places::{place, FakePlacesApi};
    use std::fs;

    fn query() -> SearchQuery {
        SearchQuery {
            address: "123 Main St, Miami, FL".to_string(),
            radius_m: 1000.0,
            category: "veterinary_care".to_string(),
        }
    }

    fn temp_dir(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("places-finder-{}-{}", label, std::process::id()))
    }

    #[tokio::test]
    async fn test_geocode_failure_is_fatal() {
        let api = FakePlacesApi::new();
        let dir = temp_dir("no-geocode");

        let result =
            SearchService::run(&api, &query(), &SearchSettings::default().without_delays(), &dir).await;

        assert!(matches!(result, Err(PlacesError::AddressNotFound(_))));
        assert_eq!(api.request_count(), 0);
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_non_finite_radius_is_rejected() {
        let api = FakePlacesApi::new().with_geocode(Coordinate::new(25.60, -80.38));
        let dir = temp_dir("bad-radius");
        let settings = SearchSettings::default().without_delays();

        for radius_m in [f64::NAN, f64::INFINITY, -1.0] {
            let bad = SearchQuery { radius_m, ..query() };
            let result = SearchService::run(&api, &bad, &settings, &dir).await;
            assert!(matches!(result, Err(PlacesError::InvalidInput(_))));
        }

        assert_eq!(api.request_count(), 0);
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_full_pipeline_writes_sorted_csv() {
        let origin = Coordinate::new(25.60, -80.38);
        let api = FakePlacesApi::new()
            .with_geocode(origin)
            .with_circle(
                vec![
                    place("FAR", "Far Vet", Coordinate::new(25.605, -80.38)),
                    place("NEAR", "Near Vet", Coordinate::new(25.601, -80.38)),
                ],
                None,
            )
            .with_details(
                "NEAR",
                PlaceDetails {
                    formatted_phone_number: Some("(305) 555-0100".to_string()),
                    ..Default::default()
                },
            );
        let dir = temp_dir("pipeline");

        let outcome =
            SearchService::run(&api, &query(), &SearchSettings::default().without_delays(), &dir)
                .await
                .unwrap();

        let ids: Vec<&str> = outcome.places.iter().map(|r| r.place.place_id.as_str()).collect();
        assert_eq!(ids, vec!["NEAR", "FAR"]);
        assert_eq!(outcome.places[0].place.phone.as_deref(), Some("(305) 555-0100"));
        assert_eq!(outcome.origin, origin);
        assert_eq!(outcome.stats.unique_places, 2);
        assert_eq!(outcome.stats.details_enriched, 1);
        assert_eq!(outcome.stats.details_failed, 1);
        assert!(outcome.stats.completed_at.is_some());

        let written = fs::read_to_string(&outcome.output_path).unwrap();
        assert_eq!(written, Exporter::render_csv(&outcome.places));
        assert!(written.contains("\"(305) 555-0100\""));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_empty_search_writes_header_only() {
        let api = FakePlacesApi::new().with_geocode(Coordinate::new(25.60, -80.38));
        let dir = temp_dir("empty");

        let outcome = tokio_test::block_on(SearchService::run(
            &api,
            &query(),
            &SearchSettings::default().without_delays(),
            &dir,
        ))
        .unwrap();

        assert!(outcome.places.is_empty());
        assert_eq!(fs::read_to_string(&outcome.output_path).unwrap(), CSV_HEADER);
        // Nothing to enrich
        assert!(api.details_requests.lock().unwrap().is_empty());

        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_skip_details() {
        let api = FakePlacesApi::new()
            .with_geocode(Coordinate::new(25.60, -80.38))
            .with_circle(vec![place("A", "Alpha", Coordinate::new(25.601, -80.38))], None);
        let dir = temp_dir("skip-details");

        let mut settings = SearchSettings::default().without_delays();
        settings.enrich_details = false;

        let outcome = SearchService::run(&api, &query(), &settings, &dir).await.unwrap();

        assert_eq!(outcome.places.len(), 1);
        assert!(api.details_requests.lock().unwrap().is_empty());

        fs::remove_dir_all(&dir).ok();
    }
}
