//! JSON bodies of the Bookstock HTTP API.
//!
//! | Method | Path                            | Body                   |
//! |--------|---------------------------------|------------------------|
//! | POST   | `{root}/UploadBooks`            | [`UploadBooksRequest`] |
//!
//! A successful `UploadBooks` answers with a bare JSON integer (the number
//! of inserted books). Every failure answers with an [`ErrorEnvelope`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Service root the server mounts its catalog routes under.
pub const DEFAULT_SERVICE_ROOT: &str = "/odata/v4/catalog";

/// Name of the bulk import action, relative to the service root.
pub const UPLOAD_BOOKS_ACTION: &str = "UploadBooks";

/// Error codes carried in [`ErrorBody::code`].
pub mod error_codes {
    pub const EMPTY_BATCH: &str = "EMPTY_BATCH";
    pub const ROW_VALIDATION: &str = "ROW_VALIDATION";
    pub const DUPLICATE_TITLE: &str = "DUPLICATE_TITLE";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const STORE_FAILURE: &str = "STORE_FAILURE";
}

/// One candidate as sent over the wire.
///
/// Fields are kept as raw JSON so that the server, not the deserializer,
/// decides what a wrong type means for the row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadItem {
    #[serde(default)]
    pub title: Value,
    #[serde(default)]
    pub stock: Value,
}

/// Body of `POST {root}/UploadBooks`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadBooksRequest {
    #[serde(default)]
    pub items: Option<Vec<UploadItem>>,
}

/// Error response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    /// One entry per individual violation, when there are several.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl ErrorEnvelope {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
                details: Vec::new(),
            },
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.error.details = details;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_without_items() {
        let req: UploadBooksRequest = serde_json::from_str("{}").unwrap();
        assert!(req.items.is_none());
    }

    #[test]
    fn test_item_missing_fields_default_to_null() {
        let req: UploadBooksRequest =
            serde_json::from_value(json!({ "items": [{ "title": "Dune" }] })).unwrap();
        let items = req.items.unwrap();
        assert_eq!(items[0].title, json!("Dune"));
        assert_eq!(items[0].stock, Value::Null);
    }

    #[test]
    fn test_error_envelope_format() {
        let env = ErrorEnvelope::new(error_codes::EMPTY_BATCH, "No records were provided");
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({ "error": { "code": "EMPTY_BATCH", "message": "No records were provided" } })
        );

        let env = env.with_details(vec!["a".into()]);
        assert_eq!(serde_json::to_value(&env).unwrap()["error"]["details"], json!(["a"]));
    }
}
