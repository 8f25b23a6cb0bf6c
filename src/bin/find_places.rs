// src/bin/find_places.rs
// DOCUMENTATION: Command line search
// PURPOSE: Run one grid search from the terminal and write the CSV export

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use places_finder::models::SearchQuery;
use places_finder::services::distance::format_miles;
use places_finder::services::{GooglePlacesClient, RankedPlace, SearchService, SearchStats};
use places_finder::Config;
use std::path::PathBuf;
use std::process;

// --- ANSI colours ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Find every place of a category around an address
#[derive(Debug, Parser)]
#[command(name = "find-places", version)]
struct Cli {
    /// Street address to search around
    address: String,
    /// Search radius in meters
    #[arg(value_parser = parse_radius)]
    radius_meters: f64,
    /// Google place type, e.g. veterinary_care
    category: String,
    /// Directory for the CSV export (defaults to the current directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Skip Place Details lookups (no phone numbers or websites)
    #[arg(long)]
    skip_details: bool,
}

/// Radius must be a finite, non-negative number of meters
fn parse_radius(raw: &str) -> Result<f64, String> {
    let radius: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if !radius.is_finite() || radius < 0.0 {
        return Err(format!("radius must be a finite number >= 0, got {}", raw));
    }
    Ok(radius)
}

fn print_listing(places: &[RankedPlace]) {
    println!("\n{}{}", BOLD, "=".repeat(80));
    println!("Found {} places (sorted by distance)", places.len());
    println!("{}{}\n", "=".repeat(80), RESET);

    for (i, entry) in places.iter().enumerate() {
        let place = &entry.place;
        println!("{}{}. {}{}", CYAN, i + 1, place.name, RESET);
        println!("   Address: {}", place.display_address().unwrap_or("N/A"));
        println!("   Phone: {}", place.phone.as_deref().unwrap_or("N/A"));
        println!("   Distance: {} miles", format_miles(entry.distance_m));
        match (place.rating, place.user_ratings_total) {
            (Some(rating), Some(count)) => println!("   Rating: {}/5 ({} reviews)", rating, count),
            (Some(rating), None) => println!("   Rating: {}/5", rating),
            _ => println!("   Rating: N/A"),
        }
        println!(
            "   Status: {}",
            place.business_status.as_deref().unwrap_or("Unknown")
        );
        println!("   Place ID: {}", place.place_id);
        if !place.types.is_empty() {
            println!("   Types: {}", place.types.join(", "));
        }
        println!();
    }
}

fn print_summary(stats: &SearchStats) {
    println!("{}📋 Search Summary{}", BOLD, RESET);
    println!("  • Circles searched: {}/{}", stats.circles_searched, stats.circles_planned);
    println!("  • Pages fetched: {}", stats.pages_fetched);
    println!("  • Results retrieved: {}", stats.places_retrieved);
    println!("  • Duplicates skipped: {}", stats.duplicates_skipped);
    println!("  • Outside radius: {}", stats.outside_radius);
    println!("  • Details enriched: {}", stats.details_enriched);
    println!("  • Duration: {}s", stats.duration_seconds);

    if !stats.errors.is_empty() {
        println!(
            "{}⚠️  {} circles failed:{}",
            YELLOW, stats.circles_failed, RESET
        );
        for error in &stats.errors {
            println!("     {}", error);
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env();
    let client = GooglePlacesClient::from_config(&config)
        .context("Set GOOGLE_MAPS_API_KEY in the environment or a .env file")?;

    let mut settings = config.search_settings();
    settings.enrich_details = !cli.skip_details;

    let query = SearchQuery {
        address: cli.address,
        radius_m: cli.radius_meters,
        category: cli.category,
    };
    let output_dir = cli.output_dir.unwrap_or_else(|| PathBuf::from("."));

    println!(
        "{}🔍 Searching for {} within {} m of {}...{}",
        CYAN, query.category, query.radius_m, query.address, RESET
    );

    let outcome = SearchService::run(&client, &query, &settings, &output_dir)
        .await
        .with_context(|| format!("Search for {} failed", query.category))?;

    println!(
        "{}📍 Origin: {}, {}{}",
        CYAN, outcome.origin.lat, outcome.origin.lng, RESET
    );
    print_listing(&outcome.places);
    print_summary(&outcome.stats);

    println!(
        "\n{}✅ Saved {} results to {}{}",
        GREEN,
        outcome.places.len(),
        outcome.output_path.display(),
        RESET
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{}❌ Error: {:#}{}", RED, e, RESET);
        process::exit(1);
    }
}
