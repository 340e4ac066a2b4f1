//! HTTP response helpers.
//!
//! Success bodies come straight from `bookstock_contracts`; this module maps
//! the service errors onto status codes and [`ErrorEnvelope`]s.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use bookstock_contracts::{error_codes, ErrorEnvelope};

use crate::error::{ImportError, StoreError};

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorEnvelope>);

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub service_root: String,
}

/// Create an error response
pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorEnvelope::new(code, message)))
}

/// 400 for anything wrong with the submitted batch, 500 for storage trouble.
pub fn import_error_response(err: &ImportError) -> ApiError {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let envelope = ErrorEnvelope::new(err.code(), err.to_string()).with_details(err.details());
    (status, Json(envelope))
}

pub fn store_error_response(err: &StoreError) -> ApiError {
    tracing::error!("Store error: {}", err);
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        error_codes::STORE_FAILURE,
        err.to_string(),
    )
}
