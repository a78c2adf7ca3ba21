// src/error.rs
use std::fmt;

use thiserror::Error;

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Timeout, connection failure, or an unreadable body.
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    /// Non-2xx response (after any retries).
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The workbook could not be produced or written.
    #[error("could not write workbook {path}: {reason}")]
    Serialization { path: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("no projects found for client id {0:?}")]
    NoRecords(String),
}

impl ScrapeError {
    pub fn network(url: &str, err: impl fmt::Display) -> Self {
        ScrapeError::Network { url: s!(url), reason: err.to_string() }
    }

    pub fn serialization(path: impl fmt::Display, err: impl fmt::Display) -> Self {
        ScrapeError::Serialization { path: path.to_string(), reason: err.to_string() }
    }

    /// True for fetch failures (transport or status).
    pub fn is_network(&self) -> bool {
        matches!(self, ScrapeError::Network { .. } | ScrapeError::Status { .. })
    }
}

/// A field or row that could not be extracted. Logged and counted, never fatal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseWarning {
    /// Where it happened: a URL or "page N row M".
    pub context: String,
    pub field: String,
    pub detail: String,
}

impl ParseWarning {
    pub fn new(context: impl Into<String>, field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { context: context.into(), field: field.into(), detail: detail.into() }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.context, self.field, self.detail)
    }
}
