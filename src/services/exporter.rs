// src/services/exporter.rs
// DOCUMENTATION: CSV export of search results
// PURPOSE: Sort places by distance from the origin and write the download file

use crate::errors::PlacesError;
use crate::models::{Coordinate, PlaceResult};
use crate::services::distance::{distance_meters, format_miles};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed header line of every export
pub const CSV_HEADER: &str = "Name,Address,Phone,Distance (miles),Rating,Reviews,Place ID";

/// A place paired with its distance from the search origin
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPlace {
    pub place: PlaceResult,
    /// Great-circle distance from the origin, in meters
    pub distance_m: f64,
}

pub struct Exporter;

impl Exporter {
    /// Compute distances and sort closest first
    /// DOCUMENTATION: Stable, so equal distances keep their input order
    pub fn rank_by_distance(results: Vec<PlaceResult>, origin: Coordinate) -> Vec<RankedPlace> {
        let mut ranked: Vec<RankedPlace> = results
            .into_iter()
            .map(|place| RankedPlace {
                distance_m: distance_meters(origin, place.location),
                place,
            })
            .collect();

        ranked.sort_by(|a, b| {
            a.distance_m
                .partial_cmp(&b.distance_m)
                .unwrap_or(Ordering::Equal)
        });
        ranked
    }

    /// Render ranked places as CSV text
    /// DOCUMENTATION: Name, address and phone are always quoted with embedded
    /// quotes doubled; rows are joined by `\n` without a trailing newline
    pub fn render_csv(ranked: &[RankedPlace]) -> String {
        let mut lines = Vec::with_capacity(ranked.len() + 1);
        lines.push(CSV_HEADER.to_string());

        for entry in ranked {
            let place = &entry.place;
            lines.push(format!(
                "{},{},{},{},{},{},{}",
                quote(&place.name),
                quote(place.display_address().unwrap_or("")),
                quote(place.phone.as_deref().unwrap_or("N/A")),
                format_miles(entry.distance_m),
                place
                    .rating
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                place.user_ratings_total.unwrap_or(0),
                place.place_id
            ));
        }

        lines.join("\n")
    }

    /// `<category>_<YYYY-MM-DDTHH-MM-SS>.csv`
    pub fn export_filename(category: &str, timestamp: DateTime<Utc>) -> String {
        format!(
            "{}_{}.csv",
            sanitize_category(category),
            timestamp.format("%Y-%m-%dT%H-%M-%S")
        )
    }

    /// Sort, render and write results into `output_dir`
    /// DOCUMENTATION: Returns the path written. Any I/O failure is fatal to
    /// the run and surfaces as ExportWriteError.
    pub fn export(
        results: Vec<PlaceResult>,
        origin: Coordinate,
        category: &str,
        output_dir: &Path,
    ) -> Result<PathBuf, PlacesError> {
        let ranked = Self::rank_by_distance(results, origin);
        Self::write_ranked(&ranked, category, output_dir)
    }

    /// Write already ranked places into `output_dir`
    pub fn write_ranked(
        ranked: &[RankedPlace],
        category: &str,
        output_dir: &Path,
    ) -> Result<PathBuf, PlacesError> {
        fs::create_dir_all(output_dir).map_err(|e| {
            PlacesError::ExportWriteError(format!("{}: {}", output_dir.display(), e))
        })?;

        let path = output_dir.join(Self::export_filename(category, Utc::now()));
        let content = Self::render_csv(ranked);

        fs::write(&path, content).map_err(|e| {
            log::error!("Error saving CSV file {}: {}", path.display(), e);
            PlacesError::ExportWriteError(format!("{}: {}", path.display(), e))
        })?;

        log::info!(
            "Saved {} results sorted by distance to {}",
            ranked.len(),
            path.display()
        );
        Ok(path)
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn sanitize_category(category: &str) -> String {
    let cleaned: String = category
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "places".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fake_places::place;
    use chrono::TimeZone;

    fn origin() -> Coordinate {
        Coordinate::new(25.60, -80.38)
    }

    /// Minimal RFC 4180 reader for checking what the exporter wrote
    fn parse_csv(text: &str) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        for line in text.split('\n') {
            let mut fields = Vec::new();
            let mut field = String::new();
            let mut in_quotes = false;
            let mut chars = line.chars().peekable();
            while let Some(c) = chars.next() {
                match (c, in_quotes) {
                    ('"', true) if chars.peek() == Some(&'"') => {
                        field.push('"');
                        chars.next();
                    }
                    ('"', true) => in_quotes = false,
                    ('"', false) => in_quotes = true,
                    (',', false) => fields.push(std::mem::take(&mut field)),
                    (c, _) => field.push(c),
                }
            }
            fields.push(field);
            rows.push(fields);
        }
        rows
    }

    fn sample_results() -> Vec<PlaceResult> {
        let mut far = place("FAR", "Far \"Big\" Hospital", Coordinate::new(25.65, -80.38));
        far.phone = Some("(305) 555-0300".to_string());
        far.rating = Some(3.5);
        far.user_ratings_total = Some(7);

        let mut near = place("NEAR", "Near, Clinic", Coordinate::new(25.601, -80.38));
        near.vicinity = Some("1 \"Main\" St, Miami".to_string());
        near.rating = None;
        near.user_ratings_total = None;

        let mid = place("MID", "Mid Vet", Coordinate::new(25.62, -80.38));

        vec![far, near, mid]
    }

    #[test]
    fn test_rank_by_distance_sorts_ascending() {
        let ranked = Exporter::rank_by_distance(sample_results(), origin());
        let ids: Vec<&str> = ranked.iter().map(|r| r.place.place_id.as_str()).collect();

        assert_eq!(ids, vec!["NEAR", "MID", "FAR"]);
        assert!(ranked.windows(2).all(|w| w[0].distance_m <= w[1].distance_m));
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let spot = Coordinate::new(25.61, -80.38);
        let results = vec![place("1", "One", spot), place("2", "Two", spot), place("3", "Three", spot)];

        let ranked = Exporter::rank_by_distance(results, origin());
        let ids: Vec<&str> = ranked.iter().map(|r| r.place.place_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_csv_round_trip() {
        let ranked = Exporter::rank_by_distance(sample_results(), origin());
        let csv = Exporter::render_csv(&ranked);
        let rows = parse_csv(&csv);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].join(","), CSV_HEADER);
        assert!(rows.iter().all(|r| r.len() == 7));

        for (row, entry) in rows[1..].iter().zip(&ranked) {
            let place = &entry.place;
            assert_eq!(row[0], place.name);
            assert_eq!(row[1], place.display_address().unwrap_or(""));
            assert_eq!(row[2], place.phone.clone().unwrap_or_else(|| "N/A".to_string()));
            assert_eq!(row[3], format_miles(entry.distance_m));
            assert_eq!(
                row[4],
                place.rating.map(|r| r.to_string()).unwrap_or_else(|| "N/A".to_string())
            );
            assert_eq!(row[5], place.user_ratings_total.unwrap_or(0).to_string());
            assert_eq!(row[6], place.place_id);
        }

        // Quotes escaped on the wire and recovered by the reader
        assert!(csv.contains("\"Far \"\"Big\"\" Hospital\""));
        assert_eq!(rows[3][0], "Far \"Big\" Hospital");
        assert_eq!(rows[1][0], "Near, Clinic");
        assert_eq!(rows[1][1], "1 \"Main\" St, Miami");
        assert_eq!(rows[1][4], "N/A");
        assert_eq!(rows[1][5], "0");
        assert_eq!(rows[3][4], "3.5");
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_empty_export_is_header_only() {
        assert_eq!(Exporter::render_csv(&[]), CSV_HEADER);
    }

    #[test]
    fn test_export_filename() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 19, 14, 5, 9).unwrap();

        assert_eq!(
            Exporter::export_filename("veterinary_care", ts),
            "veterinary_care_2026-10-19T14-05-09.csv"
        );
        assert_eq!(
            Exporter::export_filename("../etc/passwd", ts),
            "___etc_passwd_2026-10-19T14-05-09.csv"
        );
        assert_eq!(
            Exporter::export_filename("  ", ts),
            "places_2026-10-19T14-05-09.csv"
        );
    }

    #[test]
    fn test_export_writes_file() {
        let dir = std::env::temp_dir().join(format!("places-finder-export-{}", std::process::id()));
        let ranked = Exporter::rank_by_distance(sample_results(), origin());

        let path = Exporter::export(sample_results(), origin(), "veterinary_care", &dir).unwrap();

        assert!(path.starts_with(&dir));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("veterinary_care_") && name.ends_with(".csv"));
        assert_eq!(fs::read_to_string(&path).unwrap(), Exporter::render_csv(&ranked));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_export_write_failure() {
        // A regular file cannot act as the output directory
        let blocker = std::env::temp_dir().join(format!("places-finder-blocker-{}", std::process::id()));
        fs::write(&blocker, "not a directory").unwrap();

        let result = Exporter::export(vec![], origin(), "veterinary_care", &blocker);
        assert!(matches!(result, Err(PlacesError::ExportWriteError(_))));

        fs::remove_file(&blocker).ok();
    }
}
