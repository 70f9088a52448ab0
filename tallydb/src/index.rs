//! The container key index.

use std::path::Path;

use tallydb_core::encoding::keys::{
    decode_container_key, decode_count, encode_container_key, encode_container_prefix,
    encode_count,
};
use tallydb_core::{ContainerId, ContainerKey, ContainerSummary};
use tallydb_storage::backends::redb::{RedbConfig, RedbEngine};
use tallydb_storage::{Cursor, ResetOutcome, StorageEngine};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::scan::{PrefixScan, RawScan};

/// Name of the logical table holding `(container, prefix, version) -> count`
/// entries.
pub const TABLE_CONTAINER_KEYS: &str = "container_keys";

/// A secondary index mapping `(container, key prefix, version)` to key counts.
///
/// The index materializes which key prefixes live in which container and how
/// many keys each prefix covers. Entries are stored under an order-preserving
/// encoding (container ID, then prefix, then version), so reading one
/// container is a contiguous range scan and the paginated container listing
/// is a single ordered pass with no sorting step.
///
/// Point writes are visible to subsequent reads immediately. Scans read from
/// a snapshot taken when they are created.
///
/// # Example
///
/// ```ignore
/// use tallydb::{ContainerId, ContainerKey, ContainerKeyIndex};
///
/// let index = ContainerKeyIndex::in_memory()?;
/// let key = ContainerKey::new(ContainerId::new(1), "block_0001");
/// index.put_count(&key, 3)?;
/// assert_eq!(index.key_count(&key)?, 3);
/// for entry in index.prefixes(ContainerId::new(1))? {
///     let (key, count) = entry?;
///     println!("{}: {count}", key.prefix);
/// }
/// ```
pub struct ContainerKeyIndex<E: StorageEngine> {
    engine: E,
}

impl<E: StorageEngine> ContainerKeyIndex<E> {
    /// Create an index on top of an existing storage engine.
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Access the underlying storage engine.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Replace the entire index with `entries`.
    ///
    /// The backing store is destroyed and re-created empty, then the entries
    /// are loaded. Consuming `self` invalidates every handle to the old
    /// data. The returned [`ResetOutcome`] reports whether a previous
    /// on-disk artifact survived the reset; the rebuilt index is complete
    /// either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be re-created or a load write
    /// fails.
    pub fn rebuild(
        self,
        entries: impl IntoIterator<Item = (ContainerKey, u64)>,
    ) -> Result<(Self, ResetOutcome)> {
        let (engine, outcome) = self.engine.reset()?;
        let index = Self { engine };
        let mut loaded = 0u64;
        for (key, count) in entries {
            index.put_count(&key, count)?;
            loaded += 1;
        }
        info!(entries = loaded, "rebuilt container key index");
        Ok((index, outcome))
    }

    /// Store the key count for `key`, replacing any previous count.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn put_count(&self, key: &ContainerKey, count: u64) -> Result<()> {
        let encoded = encode_container_key(key);
        self.engine
            .put(TABLE_CONTAINER_KEYS, &encoded, &encode_count(count))?;
        Ok(())
    }

    /// Get the key count stored for `key`. Absent keys count zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Corrupt`] if a stored count cannot be decoded, or an
    /// error if the read fails.
    pub fn key_count(&self, key: &ContainerKey) -> Result<u64> {
        let encoded = encode_container_key(key);
        match self.engine.get(TABLE_CONTAINER_KEYS, &encoded)? {
            Some(value) => decode_count(&value).ok_or_else(|| Error::Corrupt {
                table: TABLE_CONTAINER_KEYS,
                detail: format!(
                    "undecodable {}-byte count for container {} prefix {:?}",
                    value.len(),
                    key.container,
                    key.prefix
                ),
            }),
            None => Ok(0),
        }
    }

    /// Remove the entry for `key`, returning whether it was present.
    ///
    /// Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn delete(&self, key: &ContainerKey) -> Result<bool> {
        let encoded = encode_container_key(key);
        Ok(self.engine.delete(TABLE_CONTAINER_KEYS, &encoded)?)
    }

    /// Scan every entry of `container` in key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan snapshot cannot be started.
    pub fn prefixes(&self, container: ContainerId) -> Result<PrefixScan<E::Cursor<'_>>> {
        let cursor = self.engine.cursor(TABLE_CONTAINER_KEYS)?;
        Ok(PrefixScan::new(cursor, container, encode_container_prefix(container), None))
    }

    /// Scan the entries of `container` strictly after `start_prefix`.
    ///
    /// Every version of `start_prefix` itself is excluded, which is what
    /// lets a caller resume from the last prefix of the previous page
    /// without seeing it again. An empty `start_prefix` scans the whole
    /// container.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan snapshot cannot be started.
    pub fn prefixes_after(
        &self,
        container: ContainerId,
        start_prefix: &str,
    ) -> Result<PrefixScan<E::Cursor<'_>>> {
        if start_prefix.is_empty() {
            return self.prefixes(container);
        }
        let cursor = self.engine.cursor(TABLE_CONTAINER_KEYS)?;
        let seek_key = encode_container_key(&ContainerKey::new(container, start_prefix));
        Ok(PrefixScan::new(cursor, container, seek_key, Some(start_prefix.to_string())))
    }

    /// List containers with their aggregated key counts, in container order.
    ///
    /// Counts of all entries sharing a container ID are summed into one
    /// [`ContainerSummary`]. `limit` bounds the number of distinct
    /// containers returned; a negative limit means unbounded and zero
    /// returns nothing. When `start` is a nonzero container ID, the listing
    /// begins after it: every entry of `start` itself is excluded, so a
    /// caller can resume from the last container of the previous page.
    /// Undecodable entries are skipped and logged at warn.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan snapshot cannot be started or a read
    /// fails mid-scan.
    pub fn containers(&self, limit: i64, start: ContainerId) -> Result<Vec<ContainerSummary>> {
        let mut cursor = self.engine.cursor(TABLE_CONTAINER_KEYS)?;
        let skip_start = start.as_u64() > 0;
        let mut entry = if skip_start {
            cursor.seek(&encode_container_prefix(start))?
        } else {
            cursor.seek_first()?
        };
        let mut summaries: Vec<ContainerSummary> = Vec::new();
        while let Some((key_bytes, value_bytes)) = entry {
            match (decode_container_key(&key_bytes), decode_count(&value_bytes)) {
                (Some(key), Some(count)) if !(skip_start && key.container == start) => {
                    match summaries.last_mut() {
                        // Entries of one container are contiguous, so a
                        // matching tail summary absorbs the count.
                        Some(last) if last.container == key.container => last.key_count += count,
                        _ => {
                            if limit >= 0 && summaries.len() as i64 == limit {
                                break;
                            }
                            summaries
                                .push(ContainerSummary { container: key.container, key_count: count });
                        }
                    }
                }
                (Some(_), Some(_)) => {}
                _ => warn!("skipping undecodable entry in container key table"),
            }
            entry = cursor.next()?;
        }
        Ok(summaries)
    }

    /// Scan every entry of the index in key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan snapshot cannot be started.
    pub fn scan(&self) -> Result<RawScan<E::Cursor<'_>>> {
        let cursor = self.engine.cursor(TABLE_CONTAINER_KEYS)?;
        Ok(RawScan::new(cursor))
    }
}

impl ContainerKeyIndex<RedbEngine> {
    /// Open or create a file-backed index at `path` with default
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(Config::new(path.as_ref()))
    }

    /// Open or create a file-backed index.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open_with_config(config: Config) -> Result<Self> {
        let mut redb_config = RedbConfig::new();
        if let Some(cache_size) = config.cache_size {
            redb_config = redb_config.cache_size(cache_size);
        }
        let engine = RedbEngine::open_with_config(&config.path, redb_config)
            .map_err(|e| Error::Open(e.to_string()))?;
        Ok(Self::new(engine))
    }

    /// Create an in-memory index for tests or ephemeral use.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self> {
        let engine = RedbEngine::in_memory().map_err(|e| Error::Open(e.to_string()))?;
        Ok(Self::new(engine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_roundtrip() {
        let index = ContainerKeyIndex::in_memory().expect("create index");
        let key = ContainerKey::new(ContainerId::new(1), "block");
        assert_eq!(index.key_count(&key).expect("absent"), 0);
        index.put_count(&key, 7).expect("put");
        assert_eq!(index.key_count(&key).expect("get"), 7);
    }

    #[test]
    fn test_delete_reports_presence() {
        let index = ContainerKeyIndex::in_memory().expect("create index");
        let key = ContainerKey::new(ContainerId::new(1), "block");
        assert!(!index.delete(&key).expect("delete absent"));
        index.put_count(&key, 1).expect("put");
        assert!(index.delete(&key).expect("delete"));
        assert!(!index.delete(&key).expect("delete again"));
    }
}
