//! Centralized error handling for portcall.
//!
//! Every fallible library operation returns [`Result<T>`], which carries a
//! [`PortcallError`]. The variants mirror the pipeline's error taxonomy:
//!
//! - load failures surface as [`PortcallError::Io`] or
//!   [`PortcallError::DataProcessing`] and are caught at the loader boundary;
//! - a missing *required* column is [`PortcallError::MissingColumn`], reported
//!   to the user instead of crashing the run;
//! - unparseable cell values are never errors, they become nulls.
//!
//! ```
//! use portcall::error::PortcallError;
//!
//! fn describe(err: &PortcallError) -> String {
//!     match err {
//!         PortcallError::MissingColumn(name) => format!("cannot summarise without {name}"),
//!         other => other.to_string(),
//!     }
//! }
//! ```
//!
//! The [`ResultExt`] trait adds `.context()` to any result whose error converts
//! into [`PortcallError`]:
//!
//! ```no_run
//! use portcall::error::ResultExt as _;
//!
//! fn read_raw(path: &str) -> portcall::error::Result<String> {
//!     std::fs::read_to_string(path).context("Failed to read port-call export")
//! }
//! ```

use std::fmt;

/// Main error type for portcall operations.
#[derive(Debug)]
pub enum PortcallError {
    /// I/O errors (file operations)
    Io(std::io::Error),

    /// Data processing errors (Polars, parsing, etc.)
    DataProcessing(String),

    /// A column the current operation cannot run without is absent
    MissingColumn(String),

    /// Configuration errors
    Config(String),

    /// Chart rendering or export failed
    Chart(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for PortcallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::MissingColumn(name) => write!(f, "Required column missing: {name}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Chart(msg) => write!(f, "Chart error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PortcallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PortcallError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for PortcallError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(format!("{err:#}"))
    }
}

impl From<serde_json::Error> for PortcallError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for PortcallError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for portcall operations.
pub type Result<T> = std::result::Result<T, PortcallError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<PortcallError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: PortcallError = e.into();
            PortcallError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: PortcallError = e.into();
            PortcallError::Other(format!("{}: {}", f(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_display() {
        let err = PortcallError::MissingColumn("CARGO_TONNAGE".to_owned());
        assert_eq!(err.to_string(), "Required column missing: CARGO_TONNAGE");
    }

    #[test]
    fn test_polars_error_conversion() {
        let err: PortcallError =
            polars::error::PolarsError::ColumnNotFound("VESSEL_NAME".into()).into();
        assert!(matches!(err, PortcallError::DataProcessing(_)));
        assert!(err.to_string().contains("VESSEL_NAME"));
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "vessel_calls.csv",
        ));

        let result: Result<()> = result.context("Failed to read file");
        let message = result.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(message.contains("Failed to read file"));
        assert!(message.contains("vessel_calls.csv"));
    }
}
