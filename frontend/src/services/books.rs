//! Read access to the book list.

use bookstock_contracts::BooksPage;
use gloo_net::http::Request;

use super::upload::rejection;
use crate::config::service_url;
use crate::types::{AppError, AppResult};

pub async fn fetch_books() -> AppResult<BooksPage> {
    let response = Request::get(&format!("{}/Books", service_url()))
        .send()
        .await?;

    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(rejection(status, &body));
    }

    response
        .json::<BooksPage>()
        .await
        .map_err(|e| AppError::Transport(format!("Unexpected response: {}", e)))
}
