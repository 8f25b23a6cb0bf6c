// src/handlers/search.rs
// DOCUMENTATION: HTTP handlers for the search form
// PURPOSE: Run searches on behalf of the web page and serve the exported CSV files

use crate::config::Config;
use crate::errors::PlacesError;
use crate::models::{SearchFormRequest, SearchFormResponse};
use crate::services::{GooglePlacesClient, SearchService};
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// POST /search
/// Run a complete search and report the file it produced
pub async fn search(
    config: web::Data<Config>,
    req: web::Json<SearchFormRequest>,
) -> Result<impl Responder, PlacesError> {
    if let Err(e) = req.validate() {
        return Err(PlacesError::ValidationError(e.to_string()));
    }

    let query = req.into_inner().to_query();
    log::info!(
        "Search request: {} within {} m of {}",
        query.category,
        query.radius_m,
        query.address
    );

    let client = GooglePlacesClient::from_config(&config)?;
    let outcome =
        SearchService::run(&client, &query, &config.search_settings(), &config.output_dir).await?;

    let output_file = outcome
        .output_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(SearchFormResponse {
        success: true,
        message: format!("Found {} places", outcome.places.len()),
        output_file,
        total_places: outcome.places.len(),
    }))
}

/// GET /download/{filename}
/// Serve a previously exported CSV as an attachment
pub async fn download(
    config: web::Data<Config>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let filename = path.into_inner();
    validate_filename(&filename)?;

    let file_path = config.output_dir.join(&filename);
    let content = match tokio::fs::read(&file_path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PlacesError::NotFound(format!("File {} not found", filename)));
        }
        Err(e) => {
            log::error!("Failed to read {}: {}", file_path.display(), e);
            return Err(PlacesError::NotFound(format!("File {} not readable", filename)));
        }
    };

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .body(content))
}

/// Only bare file names inside the output directory may be downloaded
fn validate_filename(filename: &str) -> Result<(), PlacesError> {
    if filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
    {
        return Err(PlacesError::InvalidInput(format!(
            "Invalid file name: {}",
            filename
        )));
    }
    Ok(())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/search", web::post().to(search))
        .route("/download/{filename}", web::get().to(download));
}
