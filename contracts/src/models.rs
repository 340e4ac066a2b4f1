//! Domain models shared by the client and the server.
//!
//! - [`CandidateRecord`] - one parsed, not yet validated CSV row
//! - [`ImportBatch`] - ordered candidates submitted together
//! - [`Book`] - a persisted book as returned by the read API

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::wire::{UploadBooksRequest, UploadItem};

// =============================================================================
// Candidate Record
// =============================================================================

/// A CSV row after parsing and before any validation.
///
/// Both fields hold the raw cell text. `None` means the row was too short to
/// reach that column (or the header has no such column).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateRecord {
    pub title: Option<String>,
    pub stock: Option<String>,
}

impl CandidateRecord {
    pub fn new(title: impl Into<String>, stock: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            stock: Some(stock.into()),
        }
    }

    /// Convert to the loosely typed wire form.
    ///
    /// `stock` becomes a JSON number whenever the text is numeric. Decimal
    /// text stays a float so the server can reject it as non-integral
    /// instead of it being truncated here.
    pub fn to_upload_item(&self) -> UploadItem {
        UploadItem {
            title: self
                .title
                .as_ref()
                .map(|t| Value::String(t.clone()))
                .unwrap_or(Value::Null),
            stock: self.stock.as_deref().map(stock_to_json).unwrap_or(Value::Null),
        }
    }
}

fn stock_to_json(raw: &str) -> Value {
    let text = raw.trim();
    if text.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = text.parse::<i64>() {
        return Value::Number(n.into());
    }
    match text.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(raw.to_string()),
    }
}

// =============================================================================
// Import Batch
// =============================================================================

/// The ordered set of candidates sent in one `UploadBooks` call.
///
/// Row position is the only identity a candidate has; row `n` in error
/// messages is `records[n - 1]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBatch {
    records: Vec<CandidateRecord>,
}

impl ImportBatch {
    pub fn new(records: Vec<CandidateRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateRecord> {
        self.records.iter()
    }

    /// Build the request body for the `UploadBooks` action.
    pub fn to_request(&self) -> UploadBooksRequest {
        UploadBooksRequest {
            items: Some(self.records.iter().map(CandidateRecord::to_upload_item).collect()),
        }
    }
}

impl From<Vec<CandidateRecord>> for ImportBatch {
    fn from(records: Vec<CandidateRecord>) -> Self {
        Self::new(records)
    }
}

impl IntoIterator for ImportBatch {
    type Item = CandidateRecord;
    type IntoIter = std::vec::IntoIter<CandidateRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

// =============================================================================
// Persisted Book
// =============================================================================

/// A book as stored by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// UUID v4
    pub id: String,
    pub title: String,
    pub stock: i64,
    /// Activation flag of the entity model. Imported books are always active.
    pub is_active_entity: bool,
    /// RFC 3339 creation timestamp
    pub created_at: String,
}

/// Collection response of the read API (`{ "value": [...] }`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooksPage {
    pub value: Vec<Book>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upload_item_integer_stock() {
        let item = CandidateRecord::new("Dune", "12").to_upload_item();
        assert_eq!(item.title, json!("Dune"));
        assert_eq!(item.stock, json!(12));
    }

    #[test]
    fn test_upload_item_keeps_fraction() {
        let item = CandidateRecord::new("Dune", "2.5").to_upload_item();
        assert_eq!(item.stock, json!(2.5));
    }

    #[test]
    fn test_upload_item_non_numeric_stock_sent_as_text() {
        let item = CandidateRecord::new("Dune", "lots").to_upload_item();
        assert_eq!(item.stock, json!("lots"));
    }

    #[test]
    fn test_upload_item_missing_fields_are_null() {
        let short = CandidateRecord {
            title: Some("Dune".into()),
            stock: None,
        };
        assert_eq!(short.to_upload_item().stock, Value::Null);

        let blank = CandidateRecord::new("Dune", "  ");
        assert_eq!(blank.to_upload_item().stock, Value::Null);

        let empty = CandidateRecord::default().to_upload_item();
        assert_eq!(empty.title, Value::Null);
    }

    #[test]
    fn test_batch_request_shape() {
        let batch = ImportBatch::new(vec![
            CandidateRecord::new("Dune", "5"),
            CandidateRecord::new("Emma", "-1"),
        ]);
        let body = serde_json::to_value(batch.to_request()).unwrap();

        assert_eq!(
            body,
            json!({ "items": [
                { "title": "Dune", "stock": 5 },
                { "title": "Emma", "stock": -1 }
            ]})
        );
    }

    #[test]
    fn test_book_camel_case() {
        let book = Book {
            id: "b1".into(),
            title: "Dune".into(),
            stock: 3,
            is_active_entity: true,
            created_at: "2024-01-01T00:00:00Z".into(),
        };
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["isActiveEntity"], true);
        assert_eq!(value["createdAt"], "2024-01-01T00:00:00Z");
    }
}
