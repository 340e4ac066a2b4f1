//! Backend and browser services.
//!
//! # Services
//!
//! - [`upload`] - `UploadBooks` call and error envelope handling
//! - [`books`] - Book list fetch
//! - [`file`] - Reading the selected CSV file
//! - [`template`] - Client-side template download

pub mod upload;
pub mod books;
pub mod file;
pub mod template;

pub use upload::*;
pub use books::*;
pub use file::*;
pub use template::*;
