// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use super::settings::{
    GridSettings, SearchSettings, DEFAULT_CIRCLE_DELAY_MS, DEFAULT_DETAILS_DELAY_MS,
    DEFAULT_MAX_PAGES, DEFAULT_OVERLAP_FACTOR, DEFAULT_PAGE_TOKEN_DELAY_MS,
    DEFAULT_SUB_SEARCH_RADIUS_M,
};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Google Maps Platform endpoint root
pub const DEFAULT_API_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Maps API key (Geocoding + Places enabled)
    pub google_maps_api_key: String,

    /// Root URL of the Maps web services (overridable for proxies and tests)
    pub api_base_url: String,

    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 5000)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Directory where CSV exports are written and served from
    pub output_dir: PathBuf,

    /// Delay before a pagination token may be used, in milliseconds
    pub page_token_delay_ms: u64,

    /// Delay between sub-search circles, in milliseconds
    pub circle_delay_ms: u64,

    /// Delay between Place Details requests, in milliseconds
    pub details_delay_ms: u64,

    /// Radius of each sub-search circle in meters
    pub sub_search_radius_m: u32,

    /// Maximum Nearby Search pages per circle
    pub max_pages: u32,

    /// Upstream HTTP timeout in seconds
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        // Load .env file if it exists
        dotenv().ok();

        Config {
            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY")
                .or_else(|_| env::var("GOOGLE_PLACES_API_KEY"))
                .unwrap_or_default(),

            api_base_url: env::var("PLACES_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),

            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),

            server_port: env_or("SERVER_PORT", 5000),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            output_dir: env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),

            page_token_delay_ms: env_or("PAGE_TOKEN_DELAY_MS", DEFAULT_PAGE_TOKEN_DELAY_MS),

            circle_delay_ms: env_or("CIRCLE_DELAY_MS", DEFAULT_CIRCLE_DELAY_MS),

            details_delay_ms: env_or("DETAILS_DELAY_MS", DEFAULT_DETAILS_DELAY_MS),

            sub_search_radius_m: env_or("SUB_SEARCH_RADIUS_M", DEFAULT_SUB_SEARCH_RADIUS_M),

            max_pages: env_or("MAX_PAGES", DEFAULT_MAX_PAGES),

            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures a search can run at all
    pub fn validate(&self) -> Result<(), String> {
        if self.google_maps_api_key.is_empty() {
            return Err("GOOGLE_MAPS_API_KEY is required".to_string());
        }

        if self.sub_search_radius_m == 0 {
            return Err("SUB_SEARCH_RADIUS_M must be greater than zero".to_string());
        }

        if self.page_token_delay_ms < DEFAULT_PAGE_TOKEN_DELAY_MS {
            log::warn!(
                "PAGE_TOKEN_DELAY_MS={} is below the upstream activation delay; next pages may be rejected",
                self.page_token_delay_ms
            );
        }

        Ok(())
    }

    /// Build the per-run search settings
    /// DOCUMENTATION: The only bridge between process configuration and the services
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            grid: GridSettings {
                sub_radius_m: self.sub_search_radius_m,
                overlap_factor: DEFAULT_OVERLAP_FACTOR,
            },
            page_token_delay: Duration::from_millis(self.page_token_delay_ms),
            circle_delay: Duration::from_millis(self.circle_delay_ms),
            details_delay: Duration::from_millis(self.details_delay_ms),
            max_pages: self.max_pages,
            enrich_details: true,
        }
    }
}

/// Parse an environment variable, falling back to `default` when unset or malformed
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
