//! Error types for NestKV
//!
//! Two layers of errors:
//! - [`StoreError`]: failures of the flat store itself (quota, I/O, corrupt file)
//! - [`Error`]: everything a namespace handle can return
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//! Store errors propagate through `Error::Store` unmodified.

use crate::key::KeyError;
use std::io;
use thiserror::Error;

/// Result type alias for NestKV operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for flat store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by a flat store implementation
#[derive(Debug, Error)]
pub enum StoreError {
    /// The write would push the store past its capacity
    #[error("Quota exceeded: {needed} bytes needed, capacity is {capacity} bytes")]
    QuotaExceeded {
        /// Bytes the store would hold after the write
        needed: usize,
        /// Configured capacity in bytes
        capacity: usize,
    },

    /// I/O error from a file-backed store
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Persisted store content could not be read back
    #[error("Corrupt store: {0}")]
    Corrupt(String),
}

/// Error types for namespace operations
#[derive(Debug, Error)]
pub enum Error {
    /// Logical key failed validation; raised before any store mutation
    #[error(transparent)]
    InvalidKey(#[from] KeyError),

    /// Value could not be converted to or from stored text
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Underlying flat store failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration could not be loaded or is invalid
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// True if this is a key validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidKey(_))
    }

    /// True if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Error::SerializationError(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
