// src/services/distance.rs
// DOCUMENTATION: Great-circle distance and unit helpers
// PURPOSE: Single source of truth for every radius comparison in the search

use crate::models::Coordinate;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Miles per meter
pub const MILES_PER_METER: f64 = 0.000621371;

/// Meters per mile (used when a caller speaks miles)
pub const METERS_PER_MILE: f64 = 1609.34;

/// Haversine distance between two coordinates, in meters
/// DOCUMENTATION: Pure; any finite input is accepted without validation
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Haversine distance in miles
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    meters_to_miles(distance_meters(a, b))
}

pub fn meters_to_miles(meters: f64) -> f64 {
    meters * MILES_PER_METER
}

pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

/// Two-decimal miles, as shown in listings and exports
pub fn format_miles(meters: f64) -> String {
    format!("{:.2}", meters_to_miles(meters))
}
