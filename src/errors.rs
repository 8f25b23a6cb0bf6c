// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Comprehensive error enum for all possible failures
/// Fatal to a run: AddressNotFound, ExportWriteError, Configuration.
/// Local to a circle or a place: ExternalApiError, RateLimitExceeded, DetailsFetchError.
#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Could not fetch details for {0}")]
    DetailsFetchError(String),

    #[error("Failed to write export file: {0}")]
    ExportWriteError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PlacesError {
    /// Machine-readable code used in JSON error bodies
    pub fn code(&self) -> &'static str {
        match self {
            PlacesError::AddressNotFound(_) => "ADDRESS_NOT_FOUND",
            PlacesError::ExternalApiError(_) => "EXTERNAL_API_ERROR",
            PlacesError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            PlacesError::DetailsFetchError(_) => "DETAILS_FETCH_ERROR",
            PlacesError::ExportWriteError(_) => "EXPORT_WRITE_ERROR",
            PlacesError::InvalidInput(_) => "INVALID_INPUT",
            PlacesError::ValidationError(_) => "VALIDATION_ERROR",
            PlacesError::NotFound(_) => "NOT_FOUND",
            PlacesError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

/// Convert PlacesError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for PlacesError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "success": false,
            "message": format!("Error: {}", self),
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PlacesError::AddressNotFound(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PlacesError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            PlacesError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            PlacesError::DetailsFetchError(_) => StatusCode::BAD_GATEWAY,
            PlacesError::ExportWriteError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PlacesError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PlacesError::ValidationError(_) => StatusCode::BAD_REQUEST,
            PlacesError::NotFound(_) => StatusCode::NOT_FOUND,
            PlacesError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            PlacesError::AddressNotFound("nowhere".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            PlacesError::InvalidInput("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PlacesError::NotFound("x.csv".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PlacesError::RateLimitExceeded.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn test_error_response_body() {
        let err = PlacesError::ExportWriteError("disk full".into());
        let response = err.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "EXPORT_WRITE_ERROR");
        assert_eq!(err.to_string(), "Failed to write export file: disk full");
    }
}
