//! Redb storage engine implementation.

use std::path::{Path, PathBuf};

use redb::backends::InMemoryBackend;
use redb::{Database, TableError};
use tracing::{info, warn};

use crate::engine::{ResetOutcome, StorageEngine, StorageError, StorageResult};

use super::cursor::RedbCursor;
use super::tables::{encode_table_key, DATA_TABLE};

/// Configuration for the redb storage engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedbConfig {
    /// Cache size in bytes. `None` uses redb's default.
    pub cache_size: Option<usize>,
}

impl RedbConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cache size in bytes.
    #[must_use]
    pub const fn cache_size(mut self, bytes: usize) -> Self {
        self.cache_size = Some(bytes);
        self
    }
}

/// Redb-backed storage engine.
///
/// Writes commit individually, and cursors read from the snapshot in effect
/// when they were opened. File-backed engines remember their path and
/// configuration so [`StorageEngine::reset`] can destroy and re-create the
/// database in place.
pub struct RedbEngine {
    db: Database,
    config: RedbConfig,
    path: Option<PathBuf>,
}

impl RedbEngine {
    /// Open or create a database file at `path` with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::open_with_config(path, RedbConfig::default())
    }

    /// Open or create a database file at `path`.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if a parent directory or the database cannot be
    /// created.
    pub fn open_with_config(path: impl AsRef<Path>, config: RedbConfig) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut builder = Database::builder();
        if let Some(cache_size) = config.cache_size {
            builder.set_cache_size(cache_size);
        }
        let db = builder
            .create(path)
            .map_err(|e| StorageError::Open(e.to_string()))?;
        Ok(Self { db, config, path: Some(path.to_path_buf()) })
    }

    /// Create an in-memory database for tests or ephemeral indexes.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> StorageResult<Self> {
        let db = Database::builder()
            .create_with_backend(InMemoryBackend::new())
            .map_err(|e| StorageError::Open(e.to_string()))?;
        Ok(Self { db, config: RedbConfig::default(), path: None })
    }

    /// The database file path, if this engine is file-backed.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Drop the physical data table, discarding every logical table.
    fn clear(&self) -> StorageResult<()> {
        let tx = self
            .db
            .begin_write()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        tx.delete_table(DATA_TABLE)
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        tx.commit().map_err(|e| StorageError::Transaction(e.to_string()))
    }
}

impl StorageEngine for RedbEngine {
    type Cursor<'a> = RedbCursor where Self: 'a;

    fn get(&self, table: &str, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        let tx = self
            .db
            .begin_read()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        let data = match tx.open_table(DATA_TABLE) {
            Ok(data) => data,
            // A missing data table means nothing was ever written.
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(StorageError::Internal(e.to_string())),
        };
        let encoded = encode_table_key(table, key);
        match data.get(encoded.as_slice()) {
            Ok(Some(guard)) => Ok(Some(guard.value().to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(StorageError::Internal(e.to_string())),
        }
    }

    fn put(&self, table: &str, key: &[u8], value: &[u8]) -> StorageResult<()> {
        let tx = self
            .db
            .begin_write()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        {
            let mut data = tx
                .open_table(DATA_TABLE)
                .map_err(|e| StorageError::Internal(e.to_string()))?;
            let encoded = encode_table_key(table, key);
            data.insert(encoded.as_slice(), value)
                .map_err(|e| StorageError::Internal(e.to_string()))?;
        }
        tx.commit().map_err(|e| StorageError::Transaction(e.to_string()))
    }

    fn delete(&self, table: &str, key: &[u8]) -> StorageResult<bool> {
        let tx = self
            .db
            .begin_write()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        let removed = {
            let mut data = tx
                .open_table(DATA_TABLE)
                .map_err(|e| StorageError::Internal(e.to_string()))?;
            let encoded = encode_table_key(table, key);
            let prior = data
                .remove(encoded.as_slice())
                .map_err(|e| StorageError::Internal(e.to_string()))?;
            prior.is_some()
        };
        tx.commit()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(removed)
    }

    fn cursor(&self, table: &str) -> StorageResult<Self::Cursor<'_>> {
        let tx = self
            .db
            .begin_read()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(RedbCursor::new(tx, table.to_string()))
    }

    fn reset(self) -> StorageResult<(Self, ResetOutcome)> {
        let Self { db, config, path } = self;
        // Release the handle before touching the file.
        drop(db);
        let Some(path) = path else {
            let fresh = Self::in_memory()?;
            return Ok((fresh, ResetOutcome::default()));
        };
        let stale_artifact = match std::fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "removed previous database file");
                None
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to remove previous database file");
                Some(path.clone())
            }
        };
        let fresh = Self::open_with_config(&path, config)?;
        // The reopened file may still hold data; the fresh engine must start empty.
        if stale_artifact.is_some() {
            fresh.clear()?;
        }
        Ok((fresh, ResetOutcome { stale_artifact }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_roundtrip() {
        let engine = RedbEngine::in_memory().expect("create engine");
        engine.put("tallies", b"key", b"value").expect("put");
        assert_eq!(engine.get("tallies", b"key").expect("get"), Some(b"value".to_vec()));
        assert!(engine.path().is_none());
    }

    #[test]
    fn test_get_missing_table() {
        let engine = RedbEngine::in_memory().expect("create engine");
        assert_eq!(engine.get("never-written", b"key").expect("get"), None);
    }

    #[test]
    fn test_config_builder() {
        let config = RedbConfig::new().cache_size(4 * 1024 * 1024);
        assert_eq!(config.cache_size, Some(4 * 1024 * 1024));
    }
}
