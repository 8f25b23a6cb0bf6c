// src/bin/place_details.rs
// DOCUMENTATION: Single place lookup
// PURPOSE: Print the extended Place Details of one place id

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::Parser;
use dotenv::dotenv;
use places_finder::models::{PlaceDetails, PlaceReview};
use places_finder::services::{GooglePlacesClient, PlacesApi, FULL_DETAILS_FIELDS};
use places_finder::Config;
use std::fmt::{self, Write};
use std::process;

const MAX_REVIEWS: usize = 3;
const REVIEW_PREVIEW_CHARS: usize = 100;

/// Show detailed information for one place
#[derive(Debug, Parser)]
#[command(name = "place-details", version)]
struct Cli {
    /// Google place id, as printed by find-places or found in the CSV
    place_id: String,
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(REVIEW_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

fn render_review(out: &mut String, index: usize, review: &PlaceReview) -> fmt::Result {
    let rating = review
        .rating
        .map(|r| r.to_string())
        .unwrap_or_else(|| "?".to_string());
    writeln!(
        out,
        "   {}. ⭐ {}/5 - {}",
        index + 1,
        rating,
        or_na(review.author_name.as_deref())
    )?;
    writeln!(out, "      \"{}\"", preview(review.text.as_deref().unwrap_or("")))?;
    if let Some(date) = review.time.and_then(|t| DateTime::from_timestamp(t, 0)) {
        writeln!(out, "      ({})", date.format("%Y-%m-%d"))?;
    }
    out.push('\n');
    Ok(())
}

/// Human readable summary of a details record
fn render_details(details: &PlaceDetails) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "\n🏥 PLACE DETAILS")?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "🏪 Name: {}", or_na(details.name.as_deref()))?;
    writeln!(out, "📍 Address: {}", or_na(details.formatted_address.as_deref()))?;
    writeln!(out, "📞 Phone: {}", or_na(details.formatted_phone_number.as_deref()))?;
    writeln!(out, "🌐 Website: {}", or_na(details.website.as_deref()))?;
    writeln!(
        out,
        "⭐ Rating: {} ({} reviews)",
        details
            .rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        details.user_ratings_total.unwrap_or(0)
    )?;
    let price = match details.price_level {
        Some(level) if level > 0 => "$".repeat(level as usize),
        _ => "N/A".to_string(),
    };
    writeln!(out, "💰 Price Level: {}", price)?;
    writeln!(out, "🔗 Google Maps: {}", or_na(details.url.as_deref()))?;
    writeln!(out, "📷 Photos: {}", details.photo_count)?;

    if let Some(hours) = &details.opening_hours {
        writeln!(out, "\n🕒 OPENING HOURS:")?;
        for day in &hours.weekday_text {
            writeln!(out, "   {}", day)?;
        }
        let status = if hours.open_now.unwrap_or(false) {
            "OPEN"
        } else {
            "CLOSED"
        };
        writeln!(out, "   Currently {}", status)?;
    }

    if !details.reviews.is_empty() {
        writeln!(out, "\n💬 RECENT REVIEWS:")?;
        for (i, review) in details.reviews.iter().take(MAX_REVIEWS).enumerate() {
            render_review(&mut out, i, review)?;
        }
    }

    Ok(out)
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env();
    let client = GooglePlacesClient::from_config(&config)
        .context("Set GOOGLE_MAPS_API_KEY in the environment or a .env file")?;

    println!("🔍 Getting detailed information for place ID: {}", cli.place_id);

    let details = client
        .place_details(&cli.place_id, FULL_DETAILS_FIELDS)
        .await
        .with_context(|| format!("Failed to get details for {}", cli.place_id))?;

    print!("{}", render_details(&details)?);
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("❌ {:#}", e);
        process::exit(1);
    }
}
