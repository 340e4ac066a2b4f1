//! # Bookstock contracts
//!
//! Types and logic shared by every Bookstock client and the server:
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  CSV File   │────▶│  CsvIngestParser │────▶│ ImportBatch  │────▶│ UploadBooks │
//! │ (title;stock)│    │   (client side)  │     │  (in memory) │     │   request   │
//! └─────────────┘     └──────────────────┘     └──────────────┘     └─────────────┘
//! ```
//!
//! This crate has no runtime or I/O dependencies so it compiles both for the
//! native backend/CLI and for the `wasm32` frontend.
//!
//! ## Modules
//!
//! - [`models`] - Candidate records, import batches and persisted books
//! - [`parser`] - `;`-delimited CSV ingest and the downloadable template
//! - [`wire`] - JSON request/response bodies of the HTTP API

pub mod models;
pub mod parser;
pub mod wire;

// =============================================================================
// Re-exports
// =============================================================================

pub use models::{Book, BooksPage, CandidateRecord, ImportBatch};

pub use parser::{
    decode_content, detect_encoding, parse_import_bytes, parse_import_text, ParseError,
    ParsedFile, FIELD_DELIMITER, TEMPLATE_CSV, TEMPLATE_FILE_NAME, TEMPLATE_MIME,
};

pub use wire::{
    error_codes, ErrorBody, ErrorEnvelope, UploadBooksRequest, UploadItem,
    DEFAULT_SERVICE_ROOT, UPLOAD_BOOKS_ACTION,
};
