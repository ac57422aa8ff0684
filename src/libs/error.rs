//! Error taxonomy for report generation.
//!
//! Two layers of errors exist:
//!
//! - [`SourceError`]: failures raised by a row source (database, I/O, bad rows).
//!   The report façade never lets these escape; they are folded into
//!   [`ReportError::UpstreamUnavailable`].
//! - [`ReportError`]: everything a report operation can fail with. Each variant
//!   maps onto one [`ErrorKind`], which is what the presentation boundary sees.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for row source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Failure raised by a row source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed row: {0}")]
    Malformed(String),

    #[error("Row source unavailable: {0}")]
    Unavailable(String),
}

/// Failure of a report operation.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Invalid filter option: '{0}'")]
    InvalidFilter(String),

    #[error("No user identity could be resolved")]
    MissingIdentity,

    #[error("Report data is unavailable: {0}")]
    UpstreamUnavailable(#[from] SourceError),

    #[error("{0}")]
    NotFound(String),

    #[error("Malformed duration '{0}'")]
    DataCorruption(String),

    #[error("Board '{board}' has conflicting categories: {categories}")]
    CategoryConflict { board: String, categories: String },

    #[error("{0}")]
    InvalidInput(String),
}

/// Error classification exposed at the presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidFilter,
    MissingIdentity,
    UpstreamUnavailable,
    NotFound,
    DataCorruption,
    CategoryConflict,
    InvalidInput,
}

impl ReportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::InvalidFilter(_) => ErrorKind::InvalidFilter,
            ReportError::MissingIdentity => ErrorKind::MissingIdentity,
            ReportError::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
            ReportError::NotFound(_) => ErrorKind::NotFound,
            ReportError::DataCorruption(_) => ErrorKind::DataCorruption,
            ReportError::CategoryConflict { .. } => ErrorKind::CategoryConflict,
            ReportError::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidFilter => "InvalidFilter",
            ErrorKind::MissingIdentity => "MissingIdentity",
            ErrorKind::UpstreamUnavailable => "UpstreamUnavailable",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::DataCorruption => "DataCorruption",
            ErrorKind::CategoryConflict => "CategoryConflict",
            ErrorKind::InvalidInput => "InvalidInput",
        };
        f.write_str(name)
    }
}
