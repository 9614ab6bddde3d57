//! Common error types for the hagwon services

use thiserror::Error;

/// Common result type for hagwon operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the hagwon services
///
/// Every variant carries an explicit kind discriminator so call sites
/// pattern-match instead of probing error shape at runtime.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or missing input, detected before any write
    #[error("{0}")]
    Validation(String),

    /// Upload precondition: MIME type is not an accepted image format
    #[error("Unsupported file type {mime} (accepted: {accepted})")]
    UnsupportedType { mime: String, accepted: String },

    /// Upload precondition: file exceeds the size ceiling for this call site
    #[error("File size must be less than {}MB", .limit / (1024 * 1024))]
    FileTooLarge { size: usize, limit: usize },

    /// Media store rejected the write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
