//! Error types for the FFS client
//!
//! Every public API returns `Result<T, Error>`. Nothing is swallowed: each
//! failure kind below reaches the caller untouched, and there is no
//! partial-success return shape.

use crate::pagination::QueryProblem;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// The main error type for the FFS client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Undefined template variable: {name}")]
    UndefinedVariable { name: String },

    #[error("No credential available: authenticate before issuing a query")]
    MissingCredential,

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Authentication service is under maintenance")]
    ServiceMaintenance,

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} {status_text}: {body}")]
    Transport {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Payload Errors
    // ============================================================================
    #[error("Export schema drift ({detail}); observed header: {observed}")]
    SchemaDrift { observed: String, detail: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Query rejected by server: {serialized}")]
    QueryProblems {
        problems: Vec<QueryProblem>,
        serialized: String,
    },

    #[error("Server reported field errors for event {event_id}: {errors}")]
    RecordFieldErrors { event_id: String, errors: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an undefined variable error
    pub fn undefined_var(name: impl Into<String>) -> Self {
        Self::UndefinedVariable { name: name.into() }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a transport status error
    pub fn transport(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Transport {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// Create a schema drift error
    pub fn schema_drift(observed: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::SchemaDrift {
            observed: observed.into(),
            detail: detail.into(),
        }
    }

    /// Check if a caller-side retry could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::Timeout { .. } => true,
            Error::Transport { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// A single field failed type coercion.
///
/// Carries the field identity and the raw row so an upstream change can be
/// diagnosed from the error alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// 1-based data row (CSV) or record index (JSON) within the page
    pub row: usize,
    /// Column ordinal for positional rows, `None` for JSON objects
    pub column: Option<usize>,
    /// Canonical field name for positional rows, wire key for JSON objects
    pub field: Cow<'static, str>,
    /// Why the value was rejected
    pub reason: String,
    /// The raw row, comma-joined for CSV or serialized for JSON
    pub raw: String,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(column) => write!(
                f,
                "row {}: field {} ({}): {}; raw row: {}",
                self.row, column, self.field, self.reason, self.raw
            ),
            None => write!(
                f,
                "record {}: field {}: {}; raw record: {}",
                self.row, self.field, self.reason, self.raw
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Result type alias for the FFS client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("username");
        assert_eq!(err.to_string(), "Missing required config field: username");

        let err = Error::transport(404, "Not Found", "no such endpoint");
        assert_eq!(err.to_string(), "HTTP 404 Not Found: no such endpoint");
    }

    #[test]
    fn test_decode_error_display_names_field_and_row() {
        let err = DecodeError {
            row: 3,
            column: Some(10),
            field: "file_size".into(),
            reason: "not an integer: \"abc\"".to_string(),
            raw: "id-1,create,abc".to_string(),
        };
        let text = Error::from(err).to_string();
        assert!(text.contains("field 10 (file_size)"));
        assert!(text.contains("not an integer"));
        assert!(text.contains("id-1,create,abc"));
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::Timeout { timeout_ms: 1000 }.is_retryable());
        assert!(Error::transport(429, "Too Many Requests", "").is_retryable());
        assert!(Error::transport(503, "Service Unavailable", "").is_retryable());

        assert!(!Error::transport(400, "Bad Request", "").is_retryable());
        assert!(!Error::transport(401, "Unauthorized", "").is_retryable());
        assert!(!Error::schema_drift("a,b", "column count").is_retryable());
        assert!(!Error::MissingCredential.is_retryable());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }

    #[test]
    fn test_anyhow_passthrough() {
        let err: Error = anyhow::anyhow!("collaborator failed").into();
        assert!(matches!(err, Error::Anyhow(_)));
        assert_eq!(err.to_string(), "collaborator failed");
    }
}
