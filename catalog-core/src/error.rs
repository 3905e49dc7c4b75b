//! Error types for the catalog

use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Catalog errors
#[derive(Error, Debug)]
pub enum Error {
    /// Listing (or referenced entity) does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation conflicts with the listing's current state
    /// (unavailable, already reserved, terminal approval state)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Requester is not allowed to perform this action
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Malformed input or duplicate unique field
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True for missing-entity failures (HTTP 404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// True for state-conflict failures (HTTP 409)
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    /// True for authorization failures (HTTP 403)
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Error::Forbidden(_))
    }

    /// True for input validation failures (HTTP 400)
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}
