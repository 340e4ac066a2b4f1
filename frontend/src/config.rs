//! Application configuration.
//!
//! Centralized configuration for the Bookstock frontend.
//! In development, these are hardcoded. In production, they could be
//! loaded from environment or a config file.

use bookstock_contracts::{DEFAULT_SERVICE_ROOT, UPLOAD_BOOKS_ACTION};

/// Backend API base URL.
pub const BACKEND_URL: &str = "http://localhost:3000";

/// Path of the catalog service on the backend.
pub const SERVICE_ROOT: &str = DEFAULT_SERVICE_ROOT;

/// Shown when the browser cannot read the selected file.
pub const MSG_ERROR_READ: &str = "The file could not be read. Check that it is still available and try again.";

/// Shown when the user confirms an upload with nothing parsed.
pub const MSG_NO_FILE_SELECTED: &str = "Select a CSV file with at least one book first.";

/// Delay before the book list is reloaded after a successful import.
pub const REFRESH_DELAY_MS: u32 = 500;

/// How long a toast stays visible.
pub const TOAST_DURATION_MS: u32 = 4000;

/// Maximum logs to keep in memory.
pub const MAX_LOG_ENTRIES: usize = 100;

/// Absolute URL of the catalog service root.
pub fn service_url() -> String {
    format!("{}{}", BACKEND_URL, SERVICE_ROOT)
}

/// Backend health endpoint, linked from the footer.
pub fn health_url() -> String {
    format!("{}/health", BACKEND_URL)
}

/// Absolute URL of the `UploadBooks` action.
pub fn upload_url() -> String {
    format!("{}/{}", service_url(), UPLOAD_BOOKS_ACTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_url() {
        assert_eq!(
            upload_url(),
            "http://localhost:3000/odata/v4/catalog/UploadBooks"
        );
    }

    #[test]
    fn test_health_url_targets_backend() {
        assert_eq!(health_url(), "http://localhost:3000/health");
    }
}
