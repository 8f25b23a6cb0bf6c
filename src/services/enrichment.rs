// src/services/enrichment.rs
// DOCUMENTATION: Place Details enrichment
// PURPOSE: Add phone numbers and websites to search results, one place at a time

use crate::config::SearchSettings;
use crate::models::PlaceResult;
use crate::services::google_places_client::{PlacesApi, ENRICHMENT_FIELDS};
use crate::services::point_searcher::pause;
use crate::services::search_service::SearchStats;

pub struct Enricher;

impl Enricher {
    /// Fetch details for every place
    /// DOCUMENTATION: A failed lookup keeps the search copy of the place; the
    /// run never fails because of enrichment. Order is preserved.
    pub async fn enrich_all<A: PlacesApi>(
        api: &A,
        places: Vec<PlaceResult>,
        settings: &SearchSettings,
        stats: &mut SearchStats,
    ) -> Vec<PlaceResult> {
        let total = places.len();
        let mut enriched = Vec::with_capacity(total);

        log::info!("Fetching details (phone numbers, websites) for {} places", total);

        for (idx, mut place) in places.into_iter().enumerate() {
            log::debug!("Fetching details for {} ({}/{})", place.name, idx + 1, total);

            match api.place_details(&place.place_id, ENRICHMENT_FIELDS).await {
                Ok(details) => {
                    place.apply_details(&details);
                    stats.details_enriched += 1;
                }
                Err(e) => {
                    log::warn!("Could not fetch details for {}: {}. Using basic info.", place.name, e);
                    stats.details_failed += 1;
                }
            }

            enriched.push(place);
            pause(settings.details_delay).await;
        }

        log::info!(
            "Finished fetching details: {} enriched, {} kept as-is",
            stats.details_enriched,
            stats.details_failed
        );

        enriched
    }
}
