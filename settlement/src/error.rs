//! Error types for the settlement protocol

use thiserror::Error;

/// Result type for settlement operations
pub type Result<T> = std::result::Result<T, Error>;

/// Settlement errors
#[derive(Error, Debug)]
pub enum Error {
    /// Catalog error (missing listing, reservation conflict, ownership)
    #[error("Catalog error: {0}")]
    Catalog(#[from] catalog_core::Error),

    /// Transaction does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transaction is already in a terminal state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Requester is not a party to the transaction, or not the seller
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Malformed status transition request
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Notification payload could not be built
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True for missing-entity failures (HTTP 404)
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound(_) => true,
            Error::Catalog(inner) => inner.is_not_found(),
            _ => false,
        }
    }

    /// True for state-conflict failures (HTTP 409)
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Conflict(_) => true,
            Error::Catalog(inner) => inner.is_conflict(),
            _ => false,
        }
    }

    /// True for authorization failures (HTTP 403)
    pub fn is_forbidden(&self) -> bool {
        match self {
            Error::Forbidden(_) => true,
            Error::Catalog(inner) => inner.is_forbidden(),
            _ => false,
        }
    }

    /// True for input validation failures (HTTP 400)
    pub fn is_validation(&self) -> bool {
        match self {
            Error::Validation(_) => true,
            Error::Catalog(inner) => inner.is_validation(),
            _ => false,
        }
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
