//! Common error types for the oracle services

use thiserror::Error;

/// Common result type for oracle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from configuration loading and scan storage
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

    /// Database state that should be impossible (e.g. a row missing right
    /// after its insert)
    #[error("Inconsistent data: {0}")]
    Inconsistent(String),
}
