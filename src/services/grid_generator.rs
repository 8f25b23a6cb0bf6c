// src/services/grid_generator.rs
// DOCUMENTATION: Geographic grid generation for radius coverage
// PURPOSE: Tile a requested disc with overlapping sub-search circles so every
// circle stays under the upstream per-query result cap

use crate::config::GridSettings;
use crate::models::{Coordinate, SearchCircle};
use crate::services::distance::{distance_miles, meters_to_miles};

/// Miles per degree of latitude (flat approximation used for offsets)
const MILES_PER_DEGREE_LAT: f64 = 69.0;

/// Grid generator service
/// DOCUMENTATION: Generates systematic grid coverage around a center point
pub struct GridGenerator;

impl GridGenerator {
    /// Generate search circles covering `target_radius_miles` around `center`
    /// DOCUMENTATION: Builds a square of (steps + 1)² candidate centers spaced
    /// `sub_radius × overlap_factor` miles apart, then keeps only the candidates
    /// whose great-circle distance from `center` is within the target radius.
    ///
    /// Output is row-major over (lat offset, lng offset) and fully deterministic.
    /// A radius of zero yields only the center; a negative or NaN radius yields
    /// nothing.
    ///
    /// # Arguments
    /// * `center` - Center of the requested area
    /// * `target_radius_miles` - Requested radius in miles
    /// * `settings` - Sub-search radius and overlap factor
    pub fn generate_search_points(
        center: Coordinate,
        target_radius_miles: f64,
        settings: &GridSettings,
    ) -> Vec<SearchCircle> {
        let step = Self::step_miles(settings);
        let steps = Self::grid_steps(target_radius_miles, step);
        let half = steps / 2;

        // 1 degree of longitude ≈ 69 miles * cos(latitude)
        let lng_scale = MILES_PER_DEGREE_LAT * center.lat.to_radians().cos();

        log::info!(
            "Creating {}x{} search grid (step {:.3} mi, sub-radius {} m) around {:.4}, {:.4}",
            steps,
            steps,
            step,
            settings.sub_radius_m,
            center.lat,
            center.lng
        );

        let mut circles = Vec::new();
        for x in -half..=half {
            for y in -half..=half {
                let candidate = Coordinate::new(
                    center.lat + (x as f64 * step) / MILES_PER_DEGREE_LAT,
                    center.lng + (y as f64 * step) / lng_scale,
                );

                if distance_miles(center, candidate) <= target_radius_miles {
                    circles.push(SearchCircle::new(candidate, settings.sub_radius_m));
                }
            }
        }

        log::info!(
            "Generated {} search circles to cover {:.2} miles",
            circles.len(),
            target_radius_miles
        );

        circles
    }

    /// Distance between neighbouring grid centers, in miles
    pub fn step_miles(settings: &GridSettings) -> f64 {
        meters_to_miles(settings.sub_radius_m as f64) * settings.overlap_factor
    }

    /// Side length of the candidate square, in cells
    fn grid_steps(target_radius_miles: f64, step: f64) -> i64 {
        if !(target_radius_miles > 0.0) || !target_radius_miles.is_finite() || !(step > 0.0) {
            return 0;
        }
        ((target_radius_miles * 2.0) / step).ceil() as i64
    }
}
