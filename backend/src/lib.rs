//! # Bookstock - book inventory with validated bulk CSV import
//!
//! Clients parse a `title;stock` CSV file locally and send every row in one
//! `UploadBooks` call. The service validates the whole batch and either
//! inserts all of it in one transaction or rejects all of it with
//! row-addressed messages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV File   │────▶│   Parser    │────▶│  Validator  │────▶│    Store    │
//! │(title;stock)│     │  (client)   │     │ (row + dup) │     │ (1 txn, all)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bookstock::{parse_import_text, BookImporter, SqliteBookStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = SqliteBookStore::in_memory().await.unwrap();
//!     let importer = BookImporter::new(Arc::new(store));
//!     let batch = parse_import_text("title;stock\nDune;5");
//!     let created = importer.upload_books(batch.to_request()).await.unwrap();
//!     println!("Created {} books", created);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Validated and persisted books
//! - [`validation`] - Row rules and duplicate detection
//! - [`import`] - The `UploadBooks` operation
//! - [`store`] - Transactional book storage
//! - [`config`] - Server configuration
//! - [`client`] - Command-line import client
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Validation
pub mod validation;

// Import pipeline
pub mod import;

// Storage
pub mod store;

// Configuration
pub mod config;

// Client
pub mod client;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ClientError, ImportError, RowError, RowViolation, ServerError, StoreError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Book, BooksPage, CandidateRecord, ImportBatch, NewBook};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use bookstock_contracts::{
    parse_import_bytes, parse_import_text, ParseError, ParsedFile, TEMPLATE_CSV,
    TEMPLATE_FILE_NAME,
};

// =============================================================================
// Re-exports - Import pipeline
// =============================================================================

pub use validation::{find_duplicate_titles, validate_batch, validate_item};

pub use import::{check_batch, BookImporter, ImportPhase};

pub use store::{BookStore, SqliteBookStore};

pub use client::{read_import_file, ImportClient};

pub use config::ServerConfig;

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
