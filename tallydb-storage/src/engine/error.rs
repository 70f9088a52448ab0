//! Error types for storage engine operations.

use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to open or create the database.
    #[error("failed to open database: {0}")]
    Open(String),

    /// A transaction failed to begin or commit.
    #[error("transaction error: {0}")]
    Transaction(String),

    /// The backend reported an internal failure.
    #[error("internal storage error: {0}")]
    Internal(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
