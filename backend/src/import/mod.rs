//! The `UploadBooks` operation.
//!
//! ```text
//! Received ──▶ Validating ──┬──▶ Committing ──▶ Succeeded
//!                           └──▶ Rejected
//! ```
//!
//! A batch is validated completely before the store is touched, then written
//! in a single transaction. There is no partial commit and no retry: a
//! rejected batch must be corrected and resubmitted as a whole. Nothing is
//! deduplicated against books already stored, so submitting the same valid
//! batch twice stores it twice.

use std::fmt;
use std::sync::Arc;

use bookstock_contracts::UploadBooksRequest;

use crate::api::logs::{log_error, log_info, log_success, log_warning, log_warning_indent};
use crate::error::{ImportError, ImportResult};
use crate::models::NewBook;
use crate::store::BookStore;
use crate::validation::validate_batch;

/// Lifecycle of one `UploadBooks` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPhase {
    Received,
    Validating,
    Committing,
    Succeeded,
    Rejected,
}

impl fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::Validating => "validating",
            Self::Committing => "committing",
            Self::Succeeded => "succeeded",
            Self::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// Runs bulk imports against a [`BookStore`].
#[derive(Clone)]
pub struct BookImporter {
    store: Arc<dyn BookStore>,
}

impl BookImporter {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn BookStore> {
        &self.store
    }

    /// Validate the batch and insert it atomically.
    ///
    /// Returns the number of inserted books, which always equals the batch
    /// size.
    pub async fn upload_books(&self, request: UploadBooksRequest) -> ImportResult<usize> {
        let items = request.items.unwrap_or_default();
        trace_phase(ImportPhase::Received, items.len());
        log_info(format!("Received {} record(s)", items.len()));

        trace_phase(ImportPhase::Validating, items.len());
        let books = match validate_batch(&items) {
            Ok(books) => books,
            Err(err) => {
                reject(&err);
                return Err(err);
            }
        };

        self.commit(books).await
    }

    async fn commit(&self, books: Vec<NewBook>) -> ImportResult<usize> {
        trace_phase(ImportPhase::Committing, books.len());

        match self.store.insert_books(books).await {
            Ok(stored) => {
                trace_phase(ImportPhase::Succeeded, stored.len());
                log_success(format!("Created {} book(s)", stored.len()));
                Ok(stored.len())
            }
            Err(err) => {
                let err = ImportError::from(err);
                reject(&err);
                Err(err)
            }
        }
    }
}

/// Validate without storing anything.
pub fn check_batch(request: &UploadBooksRequest) -> ImportResult<Vec<NewBook>> {
    validate_batch(request.items.as_deref().unwrap_or_default())
}

fn trace_phase(phase: ImportPhase, records: usize) {
    tracing::debug!(%phase, records, "UploadBooks");
}

fn reject(err: &ImportError) {
    trace_phase(ImportPhase::Rejected, 0);

    match err {
        ImportError::RowValidation(rows) => {
            log_warning(format!("Batch rejected: {} row error(s)", rows.len()));
            for row in rows {
                log_warning_indent(row.to_string(), 1);
            }
        }
        ImportError::Store(_) => log_error(format!("Batch rejected: {}", err)),
        _ => log_warning(format!("Batch rejected: {}", err)),
    }
}
