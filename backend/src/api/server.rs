//! HTTP Server for the Bookstock API.
//!
//! # API Endpoints
//!
//! | Method | Path                      | Description                       |
//! |--------|---------------------------|-----------------------------------|
//! | GET    | `/health`                 | Health check                      |
//! | GET    | `/api/logs`               | SSE stream of import logs         |
//! | POST   | `{root}/UploadBooks`      | Validated bulk insert of books    |
//! | GET    | `{root}/Books`            | List books                        |
//! | GET    | `{root}/Books/{id}`       | Read one book                     |
//! | GET    | `{root}/template.csv`     | Download the import template      |
//!
//! `{root}` is the configured service root, `/odata/v4/catalog` by default.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use bookstock_contracts::{
    error_codes, Book, BooksPage, UploadBooksRequest, TEMPLATE_CSV, TEMPLATE_FILE_NAME,
    TEMPLATE_MIME, UPLOAD_BOOKS_ACTION,
};

use super::logs::LOG_BROADCASTER;
use super::types::{
    error_response, import_error_response, store_error_response, ApiError, HealthResponse,
};
use crate::config::{normalize_root, ServerConfig};
use crate::error::{ServerError, ServerResult};
use crate::import::BookImporter;
use crate::store::{BookStore, SqliteBookStore};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub importer: BookImporter,
    pub service_root: String,
}

impl AppState {
    pub fn new(store: Arc<dyn BookStore>, service_root: &str) -> Self {
        Self {
            importer: BookImporter::new(store),
            service_root: normalize_root(service_root),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let root = state.service_root.clone();

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/logs", get(sse_logs))
        .route(&format!("{}/{}", root, UPLOAD_BOOKS_ACTION), post(upload_books))
        .route(&format!("{}/Books", root), get(list_books))
        .route(&format!("{}/Books/{{id}}", root), get(get_book))
        .route(&format!("{}/template.csv", root), get(download_template))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(config: ServerConfig) -> ServerResult<()> {
    let store = SqliteBookStore::connect(&config.database_url).await?;
    let state = AppState::new(Arc::new(store), &config.service_root);
    let root = state.service_root.clone();
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })?;

    tracing::info!("Bookstock server running on http://localhost:{}", config.port);
    tracing::info!("  POST {}/{}", root, UPLOAD_BOOKS_ACTION);
    tracing::info!("  GET  {}/Books", root);
    tracing::info!("  GET  {}/template.csv", root);
    tracing::info!("  GET  /api/logs (SSE)");
    tracing::info!("  Database: {}", config.database_url);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "bookstock",
        version: env!("CARGO_PKG_VERSION"),
        service_root: state.service_root,
    })
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        // Lagged receivers skip what they missed.
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// `UploadBooks` action: answers with the inserted count as a bare integer.
async fn upload_books(
    State(state): State<AppState>,
    payload: Result<Json<UploadBooksRequest>, JsonRejection>,
) -> Result<Json<usize>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Unreadable UploadBooks body: {}", rejection);
        error_response(
            StatusCode::BAD_REQUEST,
            error_codes::BAD_REQUEST,
            rejection.body_text(),
        )
    })?;

    let count = state
        .importer
        .upload_books(request)
        .await
        .map_err(|e| import_error_response(&e))?;

    Ok(Json(count))
}

async fn list_books(State(state): State<AppState>) -> Result<Json<BooksPage>, ApiError> {
    let value = state
        .importer
        .store()
        .list_books()
        .await
        .map_err(|e| store_error_response(&e))?;

    Ok(Json(BooksPage { value }))
}

async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let book = state
        .importer
        .store()
        .get_book(&id)
        .await
        .map_err(|e| store_error_response(&e))?;

    book.map(Json).ok_or_else(|| {
        error_response(
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            format!("Book '{}' not found", id),
        )
    })
}

async fn download_template() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, TEMPLATE_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", TEMPLATE_FILE_NAME),
            ),
        ],
        TEMPLATE_CSV,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use bookstock_contracts::ErrorEnvelope;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app() -> (Router, Arc<SqliteBookStore>) {
        let store = Arc::new(SqliteBookStore::in_memory().await.unwrap());
        let state = AppState::new(store.clone(), "/odata/v4/catalog");
        (router(state), store)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_upload_returns_count() {
        let (app, store) = app().await;

        let response = app
            .oneshot(post_json(
                "/odata/v4/catalog/UploadBooks",
                json!({ "items": [
                    { "title": "Dune", "stock": 5 },
                    { "title": "Emma", "stock": 2 }
                ]}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!(2));
        assert_eq!(store.count_books().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_upload_rejection_envelope() {
        let (app, store) = app().await;

        let response = app
            .oneshot(post_json(
                "/odata/v4/catalog/UploadBooks",
                json!({ "items": [{ "title": "Dune", "stock": -1 }] }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let env: ErrorEnvelope = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(env.error.code, "ROW_VALIDATION");
        assert!(env.error.message.contains("Row 1"));
        assert!(env.error.message.contains("negative"));
        assert_eq!(store.count_books().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_upload_empty_batch() {
        let (app, _) = app().await;

        let response = app
            .oneshot(post_json("/odata/v4/catalog/UploadBooks", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "EMPTY_BATCH");
    }

    #[tokio::test]
    async fn test_upload_malformed_body() {
        let (app, _) = app().await;

        let request = Request::builder()
            .method(Method::POST)
            .uri("/odata/v4/catalog/UploadBooks")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_list_and_get_books() {
        let (app, _) = app().await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/odata/v4/catalog/UploadBooks",
                json!({ "items": [{ "title": " Walden ", "stock": 1 }] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(Request::get("/odata/v4/catalog/Books").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let page: BooksPage = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(page.value.len(), 1);
        assert_eq!(page.value[0].title, "Walden");

        let uri = format!("/odata/v4/catalog/Books/{}", page.value[0].id);
        let response = app
            .clone()
            .oneshot(Request::get(uri.as_str()).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/odata/v4/catalog/Books/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_template_download() {
        let (app, _) = app().await;

        let response = app
            .oneshot(Request::get("/odata/v4/catalog/template.csv").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.contains("TemplateCsv.csv"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"title;stock");
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app().await;

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["serviceRoot"], "/odata/v4/catalog");
    }
}
