//! UI Components for the Bookstock application.
//!
//! # Layout Components
//! - [`Header`] - Navigation bar with the book count
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`BooksList`] - Stored books
//! - [`UploadDialog`] - CSV import dialog
//! - [`LogsPanel`] - Real-time import logs (SSE)
//! - [`ToastHost`] - Short notifications

mod header;
mod hero;
mod books;
mod upload;
mod toast;
mod footer;
mod logs;

pub use header::*;
pub use hero::*;
pub use books::*;
pub use upload::*;
pub use toast::*;
pub use footer::*;
pub use logs::*;
