//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Log Types** - Real-time log streaming
//! - **Toast Types** - Short user notifications
//! - **Error Types** - Frontend error handling

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Log Types
// =============================================================================

/// Log severity level.
///
/// Matches the backend's log levels for SSE streaming.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "log-info",
            LogLevel::Success => "log-success",
            LogLevel::Warning => "log-warning",
            LogLevel::Error => "log-error",
        }
    }
}

/// A single log entry from the backend.
///
/// Received via SSE from `/api/logs` endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Nesting level sent by the backend
    #[serde(default)]
    pub indent: u8,
    /// Local reception time (HH:MM:SS)
    #[serde(default)]
    pub timestamp: String,
}

// =============================================================================
// Toast Types
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Error, message: message.into() }
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// The browser could not read the selected file.
    Read(String),
    /// Network failure or an unreadable response.
    Transport(String),
    /// The service answered with an error envelope.
    Rejected { status: u16, code: String, message: String },
    /// The file content could not be decoded.
    Parse(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Read(msg) => write!(f, "{}", msg),
            AppError::Transport(msg) => write!(f, "Network error: {}", msg),
            AppError::Rejected { message, .. } => write!(f, "{}", message),
            AppError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<bookstock_contracts::ParseError> for AppError {
    fn from(err: bookstock_contracts::ParseError) -> Self {
        match err {
            bookstock_contracts::ParseError::Unreadable(msg) => AppError::Read(msg),
            bookstock_contracts::ParseError::Encoding(msg) => AppError::Parse(msg),
        }
    }
}

impl From<gloo_net::Error> for AppError {
    fn from(err: gloo_net::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_from_backend_json() {
        let entry: LogEntry =
            serde_json::from_str(r#"{"level":"warning","message":"Row 2: missing 'stock'","indent":1}"#)
                .unwrap();
        assert_eq!(entry.level, LogLevel::Warning);
        assert_eq!(entry.indent, 1);
        assert!(entry.timestamp.is_empty());
    }

    #[test]
    fn test_rejected_displays_server_message() {
        let err = AppError::Rejected {
            status: 400,
            code: "ROW_VALIDATION".into(),
            message: "Row 1: 'stock' must not be negative".into(),
        };
        assert_eq!(err.to_string(), "Row 1: 'stock' must not be negative");
    }

    #[test]
    fn test_parse_error_conversion() {
        let err: AppError = bookstock_contracts::ParseError::Unreadable("gone".into()).into();
        assert_eq!(err, AppError::Read("gone".into()));
    }
}
