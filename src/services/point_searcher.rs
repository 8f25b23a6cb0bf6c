// src/services/point_searcher.rs
// DOCUMENTATION: Paged Nearby Search for a single circle
// PURPOSE: Follow continuation tokens until the upstream has nothing left

use crate::config::SearchSettings;
use crate::errors::PlacesError;
use crate::models::{PlaceResult, SearchCircle};
use crate::services::google_places_client::{NearbySearchRequest, PlacesApi};
use std::time::Duration;

/// Pagination state
/// DOCUMENTATION: Fetching → (AwaitingTokenDelay → Fetching)* → Done
#[derive(Debug, Clone, PartialEq)]
enum PageState {
    /// Request the first page (no token) or the page behind `token`
    Fetching { token: Option<String> },
    /// Token received; it only becomes valid after the activation delay
    AwaitingTokenDelay { token: String },
    Done,
}

/// Everything one circle produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSearchOutcome {
    /// All pages concatenated, in upstream order
    pub results: Vec<PlaceResult>,
    /// Number of pages fetched
    pub pages: u32,
}

pub struct PointSearcher;

impl PointSearcher {
    /// Search one circle, following pagination
    /// DOCUMENTATION: Any page failure aborts this circle and is returned to the
    /// caller, which decides whether the run survives it.
    pub async fn search_single_point<A: PlacesApi>(
        api: &A,
        circle: &SearchCircle,
        category: &str,
        settings: &SearchSettings,
    ) -> Result<PointSearchOutcome, PlacesError> {
        let mut outcome = PointSearchOutcome::default();
        let mut state = PageState::Fetching { token: None };

        loop {
            state = match state {
                PageState::Fetching { token } => {
                    let request = NearbySearchRequest {
                        circle: *circle,
                        category,
                        page_token: token.as_deref(),
                    };
                    let page = api.nearby_search_page(&request).await?;
                    outcome.pages += 1;

                    log::debug!(
                        "Page {} at {:.4}, {:.4}: {} results",
                        outcome.pages,
                        circle.center.lat,
                        circle.center.lng,
                        page.results.len()
                    );
                    outcome.results.extend(page.results);

                    match page.next_page_token {
                        Some(next) if settings.max_pages == 0 || outcome.pages < settings.max_pages => {
                            PageState::AwaitingTokenDelay { token: next }
                        }
                        Some(_) => {
                            log::warn!(
                                "Stopping after {} pages at {:.4}, {:.4} although more were offered",
                                outcome.pages,
                                circle.center.lat,
                                circle.center.lng
                            );
                            PageState::Done
                        }
                        None => PageState::Done,
                    }
                }
                PageState::AwaitingTokenDelay { token } => {
                    pause(settings.page_token_delay).await;
                    PageState::Fetching { token: Some(token) }
                }
                PageState::Done => break,
            };
        }

        Ok(outcome)
    }
}

/// Sleep unless the delay is zero
pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
