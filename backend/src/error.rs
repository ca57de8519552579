//! Error types for request handling.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::resolver::ResolveError;
use crate::store::StoreError;

/// Failures of the add-country flow. All of them re-render the home page
/// with an inline message.
#[derive(Debug, thiserror::Error)]
pub enum AddCountryError {
    #[error("Please enter a country name")]
    Validation,
    #[error("Country not found")]
    NotFound,
    #[error("Country already visited")]
    AlreadyRecorded,
    #[error("Could not add country (DB error)")]
    Persistence(#[source] StoreError),
    #[error("Country lookup failed")]
    Lookup(#[source] StoreError),
}

impl From<ResolveError> for AddCountryError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::EmptyInput => AddCountryError::Validation,
            ResolveError::NotFound(_) => AddCountryError::NotFound,
            ResolveError::Lookup(e) => AddCountryError::Lookup(e),
        }
    }
}

/// Errors returned by the JSON endpoints.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage unavailable: {0}")]
    Unavailable(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self);
        let (status, error_type) = match &self {
            AppError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable"),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
