// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod aggregator;
pub mod distance;
pub mod enrichment;
pub mod exporter;
pub mod google_places_client;
pub mod grid_generator;
pub mod point_searcher;
pub mod search_service;

#[cfg(test)]
pub mod fake_places;

pub use aggregator::*;
pub use enrichment::*;
pub use exporter::*;
pub use google_places_client::*;
pub use grid_generator::*;
pub use point_searcher::*;
pub use search_service::*;
