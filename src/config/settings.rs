// src/config/settings.rs
// DOCUMENTATION: Tunables for a single search run
// PURPOSE: Explicit configuration handed to the grid, searcher, aggregator and enricher

use std::time::Duration;

/// Default radius of every sub-search circle, in meters
pub const DEFAULT_SUB_SEARCH_RADIUS_M: u32 = 3000;

/// Fraction of the sub-search radius used as the step between grid centers
/// (0.7 means neighbouring circles overlap by 30%)
pub const DEFAULT_OVERLAP_FACTOR: f64 = 0.7;

/// Upstream activation delay before a next_page_token can be used
pub const DEFAULT_PAGE_TOKEN_DELAY_MS: u64 = 2000;

/// Courtesy pause between two sub-search circles
pub const DEFAULT_CIRCLE_DELAY_MS: u64 = 500;

/// Courtesy pause between two Place Details calls
pub const DEFAULT_DETAILS_DELAY_MS: u64 = 100;

/// Nearby Search never serves more than three pages (60 results)
pub const DEFAULT_MAX_PAGES: u32 = 3;

/// Grid geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    /// Radius of each sub-search circle in meters
    pub sub_radius_m: u32,
    /// Step between grid centers as a fraction of the sub-search radius
    pub overlap_factor: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            sub_radius_m: DEFAULT_SUB_SEARCH_RADIUS_M,
            overlap_factor: DEFAULT_OVERLAP_FACTOR,
        }
    }
}

/// Settings for one search run
/// DOCUMENTATION: Built from Config (or defaults) and passed down explicitly,
/// so no component reads process-wide state
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub grid: GridSettings,
    /// Wait before requesting the next page with a continuation token
    pub page_token_delay: Duration,
    /// Wait after each successfully searched circle
    pub circle_delay: Duration,
    /// Wait after each Place Details request
    pub details_delay: Duration,
    /// Hard cap on pages per circle (0 = follow tokens until exhausted)
    pub max_pages: u32,
    /// Fetch Place Details (phone, website) for every accepted place
    pub enrich_details: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            grid: GridSettings::default(),
            page_token_delay: Duration::from_millis(DEFAULT_PAGE_TOKEN_DELAY_MS),
            circle_delay: Duration::from_millis(DEFAULT_CIRCLE_DELAY_MS),
            details_delay: Duration::from_millis(DEFAULT_DETAILS_DELAY_MS),
            max_pages: DEFAULT_MAX_PAGES,
            enrich_details: true,
        }
    }
}

impl SearchSettings {
    /// Same settings with every courtesy and activation delay removed
    pub fn without_delays(mut self) -> Self {
        self.page_token_delay = Duration::ZERO;
        self.circle_delay = Duration::ZERO;
        self.details_delay = Duration::ZERO;
        self
    }
}
