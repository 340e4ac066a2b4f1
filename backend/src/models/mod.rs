//! Domain models of the service.
//!
//! - [`NewBook`] - a validated row, ready to be inserted
//! - [`Book`] - a persisted book (shared with clients)
//! - [`CandidateRecord`] / [`ImportBatch`] - unvalidated input (shared with clients)

pub use bookstock_contracts::{Book, BooksPage, CandidateRecord, ImportBatch};

/// Minimum title length, counted in characters after trimming.
pub const MIN_TITLE_CHARS: usize = 3;

/// A book that passed every row rule.
///
/// Only the validator builds these, so holding one means `title` is trimmed
/// and at least [`MIN_TITLE_CHARS`] long and `stock` is non-negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub stock: i64,
}

impl NewBook {
    pub(crate) fn new(title: impl Into<String>, stock: i64) -> Self {
        Self {
            title: title.into(),
            stock,
        }
    }

    /// Title used for duplicate detection: trimmed and case-folded.
    ///
    /// Never stored.
    pub fn normalized_title(&self) -> String {
        normalize_title(&self.title)
    }
}

pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}
