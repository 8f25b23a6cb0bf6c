// src/services/aggregator.rs
// DOCUMENTATION: Grid-wide search orchestration
// PURPOSE: Query every sub-search circle, dedupe by place id, and keep only
// places truly inside the requested radius

use crate::config::SearchSettings;
use crate::models::{Coordinate, PlaceResult, SearchCircle};
use crate::services::distance::{distance_miles, meters_to_miles};
use crate::services::google_places_client::PlacesApi;
use crate::services::grid_generator::GridGenerator;
use crate::services::point_searcher::{pause, PointSearcher};
use crate::services::search_service::SearchStats;
use std::collections::HashMap;

/// Unique places keyed by place id
/// DOCUMENTATION: First insert wins; iteration follows insertion order
#[derive(Debug, Default)]
pub struct ResultSet {
    index: HashMap<String, usize>,
    places: Vec<PlaceResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, place_id: &str) -> bool {
        self.index.contains_key(place_id)
    }

    /// Insert unless the id is already present; returns whether it was added
    pub fn insert(&mut self, place: PlaceResult) -> bool {
        if self.contains(&place.place_id) {
            return false;
        }
        self.index.insert(place.place_id.clone(), self.places.len());
        self.places.push(place);
        true
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn into_vec(self) -> Vec<PlaceResult> {
        self.places
    }
}

pub struct Aggregator;

impl Aggregator {
    /// Find every place of `category` within `target_radius_meters` of `center`
    /// DOCUMENTATION: Top-level search loop
    ///
    /// Process:
    /// 1. Generate overlapping sub-search circles for the requested radius
    /// 2. Search each circle in order (paged)
    /// 3. Skip ids already accepted
    /// 4. Accept a new place only if its true distance from `center` is within
    ///    the requested radius (sub-circles reach past the boundary)
    /// 5. Log and skip circles whose search fails
    ///
    /// # Returns
    /// Unique, radius-confirmed places in first-seen order
    pub async fn find_all<A: PlacesApi>(
        api: &A,
        center: Coordinate,
        target_radius_meters: f64,
        category: &str,
        settings: &SearchSettings,
        stats: &mut SearchStats,
    ) -> Vec<PlaceResult> {
        let radius_miles = meters_to_miles(target_radius_meters);
        let circles = GridGenerator::generate_search_points(center, radius_miles, &settings.grid);

        log::info!(
            "Comprehensive search for {} within {:.2} miles using {} overlapping circles",
            category,
            radius_miles,
            circles.len()
        );

        let places =
            Self::aggregate_circles(api, center, radius_miles, &circles, category, settings, stats)
                .await
                .into_vec();

        log::info!(
            "Search complete: {} unique places from {} circles ({} failed)",
            places.len(),
            stats.circles_searched,
            stats.circles_failed
        );

        places
    }

    /// Search an explicit list of circles
    /// DOCUMENTATION: Body of find_all, separated so callers can supply their own tiling
    pub async fn aggregate_circles<A: PlacesApi>(
        api: &A,
        center: Coordinate,
        radius_miles: f64,
        circles: &[SearchCircle],
        category: &str,
        settings: &SearchSettings,
        stats: &mut SearchStats,
    ) -> ResultSet {
        let mut result_set = ResultSet::new();
        stats.circles_planned += circles.len() as u32;

        for (idx, circle) in circles.iter().enumerate() {
            log::info!(
                "Searching point {}/{} ({:.4}, {:.4})",
                idx + 1,
                circles.len(),
                circle.center.lat,
                circle.center.lng
            );

            let outcome =
                match PointSearcher::search_single_point(api, circle, category, settings).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        let error_msg = format!(
                            "Search failed at point {}/{} ({:.4}, {:.4}): {}",
                            idx + 1,
                            circles.len(),
                            circle.center.lat,
                            circle.center.lng,
                            e
                        );
                        log::warn!("{}", error_msg);
                        stats.circles_failed += 1;
                        stats.errors.push(error_msg);
                        continue;
                    }
                };

            stats.circles_searched += 1;
            stats.pages_fetched += outcome.pages;
            stats.places_retrieved += outcome.results.len() as u32;

            let total = outcome.results.len();
            let mut new_places = 0;
            for place in outcome.results {
                if result_set.contains(&place.place_id) {
                    stats.duplicates_skipped += 1;
                    continue;
                }

                if distance_miles(center, place.location) <= radius_miles {
                    result_set.insert(place);
                    new_places += 1;
                } else {
                    stats.outside_radius += 1;
                }
            }

            log::info!("   Found {} total, {} new", total, new_places);

            pause(settings.circle_delay).await;
        }

        stats.unique_places = result_set.len() as u32;
        result_set
    }
}
