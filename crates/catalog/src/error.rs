//! Error types shared by the recommendation crates.
//!
//! Loading problems (`Validation`, `Parse`, `Io`, `Json`) are fatal at
//! startup; `InvalidRequest` rejects a single request. `NotFound` is only
//! raised by direct single-book lookups; aggregate operations ignore
//! unknown ids instead. `Configuration` covers invalid counts, weights and
//! vocabulary caps.

use crate::types::BookId;
use thiserror::Error;

/// Errors raised while loading the catalog or serving a request.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A catalog record is malformed
    #[error("Invalid record {record}: {reason}")]
    Validation { record: usize, reason: String },

    /// A recommendation request body is malformed
    #[error("Invalid request field '{field}': {reason}")]
    InvalidRequest { field: String, reason: String },

    /// A direct lookup referenced a book that is not in the catalog
    #[error("Book {id} not found")]
    NotFound { id: BookId },

    /// A caller-supplied parameter is out of range
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// I/O error occurred while reading a catalog file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Line in a `.dat` catalog file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    Parse {
        file: String,
        line: usize,
        reason: String,
    },

    /// A JSON catalog or request body couldn't be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Shorthand for a validation failure on the `record`-th input row (0-based).
    pub fn validation(record: usize, reason: impl Into<String>) -> Self {
        Self::Validation {
            record,
            reason: reason.into(),
        }
    }

    pub fn invalid_request(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for malformed input, whether a catalog record or a request.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::InvalidRequest { .. })
    }

    /// True when the error means "the requested book does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
