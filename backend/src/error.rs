//! Error types for the Bookstock service.
//!
//! - [`RowViolation`] / [`RowError`] - a single row-addressed rule failure
//! - [`ImportError`] - outcome of a rejected `UploadBooks` call
//! - [`StoreError`] - storage collaborator failures
//! - [`ClientError`] - failures of the CLI import client
//! - [`ServerError`] - HTTP server startup failures
//!
//! Conversions are `From` based so `?` works across layers.

use bookstock_contracts::{error_codes, ParseError};
use thiserror::Error;

// =============================================================================
// Row Validation
// =============================================================================

/// Why a single row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowViolation {
    #[error("missing 'title'")]
    MissingTitle,

    #[error("'title' must be a string")]
    TitleNotString,

    #[error("'title' must not be empty")]
    EmptyTitle,

    #[error("'title' must be at least {min} characters")]
    TitleTooShort { min: usize },

    #[error("missing 'stock'")]
    MissingStock,

    #[error("'stock' is not numeric")]
    StockNotNumeric,

    #[error("'stock' must be an integer")]
    StockNotInteger,

    #[error("'stock' must not be negative")]
    NegativeStock,

    #[error("'stock' is too large")]
    StockTooLarge,
}

/// A rule failure attached to its 1-based input row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Row {row}: {violation}")]
pub struct RowError {
    pub row: usize,
    pub violation: RowViolation,
}

impl RowError {
    pub fn new(row: usize, violation: RowViolation) -> Self {
        Self { row, violation }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt row in '{table}': {message}")]
    Corrupt { table: &'static str, message: String },
}

// =============================================================================
// Import Errors
// =============================================================================

/// Why an import batch was not committed.
///
/// Every variant except [`ImportError::Store`] is detected before the store
/// is touched.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("No records were provided")]
    EmptyBatch,

    #[error("{}", join_rows(.0))]
    RowValidation(Vec<RowError>),

    #[error("Duplicate titles in batch: {}", .0.join(", "))]
    DuplicateTitle(Vec<String>),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl ImportError {
    /// Machine-readable code for the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyBatch => error_codes::EMPTY_BATCH,
            Self::RowValidation(_) => error_codes::ROW_VALIDATION,
            Self::DuplicateTitle(_) => error_codes::DUPLICATE_TITLE,
            Self::Store(_) => error_codes::STORE_FAILURE,
        }
    }

    /// True for failures caused by the submitted data.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Store(_))
    }

    /// One message per individual violation.
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::RowValidation(rows) => rows.iter().map(ToString::to_string).collect(),
            _ => Vec::new(),
        }
    }
}

fn join_rows(rows: &[RowError]) -> String {
    rows.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Client Errors
// =============================================================================

/// Errors of the command-line import client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Network failure or unreadable response, independent of the payload.
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server rejected the batch.
    #[error("Rejected ({status}, {code}): {message}")]
    Rejected {
        status: u16,
        code: String,
        message: String,
    },

    #[error("No records to upload")]
    NothingToUpload,
}

// =============================================================================
// Server Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type ImportResult<T> = Result<T, ImportError>;

pub type StoreResult<T> = Result<T, StoreError>;

pub type ClientResult<T> = Result<T, ClientError>;

pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_error_format() {
        let err = RowError::new(1, RowViolation::NegativeStock);
        assert_eq!(err.to_string(), "Row 1: 'stock' must not be negative");

        let err = RowError::new(4, RowViolation::TitleTooShort { min: 3 });
        assert_eq!(err.to_string(), "Row 4: 'title' must be at least 3 characters");
    }

    #[test]
    fn test_row_validation_lists_every_row() {
        let err = ImportError::RowValidation(vec![
            RowError::new(1, RowViolation::MissingTitle),
            RowError::new(3, RowViolation::StockNotNumeric),
        ]);

        assert_eq!(
            err.to_string(),
            "Row 1: missing 'title'; Row 3: 'stock' is not numeric"
        );
        assert_eq!(err.details().len(), 2);
        assert_eq!(err.code(), "ROW_VALIDATION");
    }

    #[test]
    fn test_duplicate_title_format() {
        let err = ImportError::DuplicateTitle(vec!["dune".into(), "emma".into()]);
        assert_eq!(err.to_string(), "Duplicate titles in batch: dune, emma");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_store_error_is_server_side() {
        let err: ImportError = StoreError::Corrupt {
            table: "books",
            message: "bad".into(),
        }
        .into();
        assert!(!err.is_client_error());
        assert_eq!(err.code(), "STORE_FAILURE");
    }
}
