//! Error types for the index.

use tallydb_storage::StorageError;
use thiserror::Error;

/// Errors that can occur during index operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the storage layer.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A stored entry could not be decoded.
    #[error("corrupt entry in table {table}: {detail}")]
    Corrupt {
        /// The logical table holding the entry.
        table: &'static str,
        /// What failed to decode.
        detail: String,
    },

    /// Failed to open the index.
    #[error("failed to open index: {0}")]
    Open(String),
}

/// Result type for index operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Open("bad path".to_string());
        assert_eq!(err.to_string(), "failed to open index: bad path");

        let err = Error::Corrupt { table: "container_keys", detail: "7-byte count".to_string() };
        assert_eq!(err.to_string(), "corrupt entry in table container_keys: 7-byte count");
    }

    #[test]
    fn test_storage_error_conversion() {
        let err = Error::from(StorageError::Internal("boom".to_string()));
        assert!(matches!(err, Error::Storage(_)));
    }
}
