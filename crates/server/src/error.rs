use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use byteshop_db::DbError;
use thiserror::Error;

/// Failures surfaced by HTTP handlers
///
/// Lookups that find nothing are not errors; only backend faults end up here.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Store error: {0}")]
    Store(#[from] DbError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
