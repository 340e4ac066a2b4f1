//! Command-line import client.
//!
//! Reads a CSV file, parses it locally and submits the whole batch in one
//! `UploadBooks` call, exactly like the web UI does. Any non-success answer
//! or network failure ends the attempt; nothing is retried.

use std::path::Path;

use bookstock_contracts::{
    parse_import_bytes, BooksPage, ErrorEnvelope, ImportBatch, ParseError, ParsedFile,
    UPLOAD_BOOKS_ACTION,
};

use crate::error::{ClientError, ClientResult};

/// Read and parse an import file.
///
/// Any failure to read the file is reported as an unreadable medium.
pub fn read_import_file(path: impl AsRef<Path>) -> Result<ParsedFile, ParseError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| ParseError::Unreadable(format!("{}: {}", path.display(), e)))?;

    parse_import_bytes(&bytes)
}

/// HTTP client for a Bookstock service root.
#[derive(Debug, Clone)]
pub struct ImportClient {
    http: reqwest::Client,
    service_url: String,
}

impl ImportClient {
    /// `service_url` is the absolute service root, e.g.
    /// `http://localhost:3000/odata/v4/catalog`.
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            service_url: service_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn upload_url(&self) -> String {
        format!("{}/{}", self.service_url, UPLOAD_BOOKS_ACTION)
    }

    /// Submit a batch. Returns the number of books the server created.
    pub async fn upload_books(&self, batch: &ImportBatch) -> ClientResult<usize> {
        if batch.is_empty() {
            return Err(ClientError::NothingToUpload);
        }

        let response = self
            .http
            .post(self.upload_url())
            .json(&batch.to_request())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(rejection(status.as_u16(), &body));
        }

        Ok(response.json::<usize>().await?)
    }

    pub async fn list_books(&self) -> ClientResult<BooksPage> {
        let response = self
            .http
            .get(format!("{}/Books", self.service_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(rejection(status.as_u16(), &body));
        }

        Ok(response.json::<BooksPage>().await?)
    }
}

/// Build a rejection from an error body, tolerating non-envelope bodies.
fn rejection(status: u16, body: &str) -> ClientError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) => ClientError::Rejected {
            status,
            code: env.error.code,
            message: env.error.message,
        },
        Err(_) => ClientError::Rejected {
            status,
            code: "HTTP_ERROR".to_string(),
            message: if body.is_empty() {
                format!("Error {}", status)
            } else {
                body.to_string()
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_import_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "title;stock\r\nDune;5\r\nEmma;2\r\n").unwrap();

        let parsed = read_import_file(file.path()).unwrap();
        assert_eq!(parsed.batch.len(), 2);
        assert_eq!(parsed.encoding, "utf-8");
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_import_file(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, ParseError::Unreadable(_)));
    }

    #[test]
    fn test_rejection_from_envelope() {
        let body = r#"{"error":{"code":"EMPTY_BATCH","message":"No records were provided"}}"#;
        match rejection(400, body) {
            ClientError::Rejected { status, code, message } => {
                assert_eq!(status, 400);
                assert_eq!(code, "EMPTY_BATCH");
                assert_eq!(message, "No records were provided");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_rejection_from_plain_body() {
        let err = rejection(502, "");
        assert_eq!(err.to_string(), "Rejected (502, HTTP_ERROR): Error 502");
    }

    #[test]
    fn test_upload_url() {
        let client = ImportClient::new("http://localhost:3000/odata/v4/catalog/");
        assert_eq!(
            client.upload_url(),
            "http://localhost:3000/odata/v4/catalog/UploadBooks"
        );
    }

    async fn spawn_server() -> String {
        use crate::api::{router, AppState};
        use crate::store::SqliteBookStore;
        use bookstock_contracts::DEFAULT_SERVICE_ROOT;
        use std::sync::Arc;

        let store = SqliteBookStore::in_memory().await.unwrap();
        let app = router(AppState::new(Arc::new(store), DEFAULT_SERVICE_ROOT));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        format!("http://{}{}", addr, DEFAULT_SERVICE_ROOT)
    }

    #[tokio::test]
    async fn test_upload_against_server() {
        let client = ImportClient::new(spawn_server().await);
        let batch = bookstock_contracts::parse_import_text("title;stock\nDune;5\nEmma;2");

        assert_eq!(client.upload_books(&batch).await.unwrap(), 2);
        let page = client.list_books().await.unwrap();
        assert_eq!(page.value.len(), 2);
    }

    #[tokio::test]
    async fn test_rejected_against_server() {
        let client = ImportClient::new(spawn_server().await);
        let batch = bookstock_contracts::parse_import_text("title;stock\nDune;5\n dune ;2");

        match client.upload_books(&batch).await.unwrap_err() {
            ClientError::Rejected { status, code, message } => {
                assert_eq!(status, 400);
                assert_eq!(code, "DUPLICATE_TITLE");
                assert!(message.contains("dune"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(client.list_books().await.unwrap().value.is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch_not_sent() {
        let client = ImportClient::new("http://127.0.0.1:9");
        let err = client.upload_books(&ImportBatch::default()).await.unwrap_err();
        assert!(matches!(err, ClientError::NothingToUpload));
    }
}
