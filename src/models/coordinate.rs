// src/models/coordinate.rs
// DOCUMENTATION: Geographic primitives
// PURPOSE: Points on the globe and the circles we query the Places API with

use serde::{Deserialize, Serialize};

/// A point on the globe in signed decimal degrees
/// DOCUMENTATION: Field names match Google's `geometry.location` payload,
/// so upstream locations deserialize straight into this type.
/// Ranges (-90..90, -180..180) are not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `lat,lng` as expected by the `location` query parameter
    pub fn to_query_param(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

/// One sub-search area handed to the Nearby Search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchCircle {
    /// Center point
    pub center: Coordinate,
    /// Search radius in meters
    pub radius_m: u32,
}

impl SearchCircle {
    pub fn new(center: Coordinate, radius_m: u32) -> Self {
        Self { center, radius_m }
    }
}
