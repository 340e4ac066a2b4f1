//! HTTP service for the `UploadBooks` action.

use bookstock_contracts::{ErrorEnvelope, ImportBatch};
use gloo_net::http::Request;

use crate::config::upload_url;
use crate::types::{AppError, AppResult};

/// Send the whole batch in one call. Returns the number of books created.
pub async fn upload_books(batch: &ImportBatch) -> AppResult<usize> {
    let response = Request::post(&upload_url())
        .json(&batch.to_request())?
        .send()
        .await?;

    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(rejection(status, &body));
    }

    response
        .json::<usize>()
        .await
        .map_err(|e| AppError::Transport(format!("Unexpected response: {}", e)))
}

/// Read the error envelope, falling back to the bare status.
pub(crate) fn rejection(status: u16, body: &str) -> AppError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) => AppError::Rejected {
            status,
            code: env.error.code,
            message: env.error.message,
        },
        Err(_) => AppError::Rejected {
            status,
            code: "HTTP_ERROR".to_string(),
            message: format!("Error {}", status),
        },
    }
}

/// Toast text after a successful import.
pub fn created_message(count: usize) -> String {
    format!("Created {} books.", count)
}
