//! Core storage engine traits.
//!
//! A [`StorageEngine`] is an ordered key-value store with named logical
//! tables and byte-slice keys and values. The index layered on top depends
//! only on this contract, so backends can be swapped without touching index
//! logic.

use std::path::PathBuf;

use super::error::{StorageError, StorageResult};

/// An owned key-value pair returned by cursors.
pub type KeyValue = (Vec<u8>, Vec<u8>);

/// Result of a cursor positioning operation: the entry now under the cursor,
/// or `None` when the cursor has moved past the last entry.
pub type CursorResult = Result<Option<KeyValue>, StorageError>;

/// The report of a [`StorageEngine::reset`].
///
/// Removing the previous storage artifact is best-effort. An artifact that
/// could not be removed is reported here so callers can surface it; the
/// fresh engine starts empty either way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetOutcome {
    /// Path of an on-disk artifact that survived the reset, if any.
    pub stale_artifact: Option<PathBuf>,
}

impl ResetOutcome {
    /// Whether the previous artifact was fully cleaned up.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.stale_artifact.is_none()
    }
}

/// An ordered key-value storage engine with named logical tables.
///
/// Tables are created implicitly on first write, and keys within a table are
/// ordered by raw bytes. Writes commit individually; reads and cursors
/// observe a consistent snapshot taken when they start.
///
/// Table names must not contain NUL (`0x00`).
///
/// # Example
///
/// ```ignore
/// let engine = RedbEngine::in_memory()?;
/// engine.put("tallies", b"key", b"value")?;
/// assert_eq!(engine.get("tallies", b"key")?, Some(b"value".to_vec()));
/// ```
pub trait StorageEngine: Send + Sync + Sized {
    /// The cursor type produced by [`StorageEngine::cursor`].
    type Cursor<'a>: Cursor
    where
        Self: 'a;

    /// Get the value stored under `key` in `table`.
    ///
    /// Returns `Ok(None)` when the key, or the whole table, does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn get(&self, table: &str, key: &[u8]) -> StorageResult<Option<Vec<u8>>>;

    /// Store `value` under `key` in `table`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be committed.
    fn put(&self, table: &str, key: &[u8], value: &[u8]) -> StorageResult<()>;

    /// Remove the value stored under `key` in `table`.
    ///
    /// Returns whether a value was present. Deleting an absent key is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be committed.
    fn delete(&self, table: &str, key: &[u8]) -> StorageResult<bool>;

    /// Open a forward cursor over `table`.
    ///
    /// The cursor reads from a snapshot taken here; writes made after this
    /// call are not visible to it. A table that does not exist yet yields an
    /// empty cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be started.
    fn cursor(&self, table: &str) -> StorageResult<Self::Cursor<'_>>;

    /// Destroy all stored data and return a fresh, empty engine at the same
    /// location.
    ///
    /// Consuming `self` guarantees that no reads or cursors from the old
    /// engine survive the reset. Removal of the previous on-disk artifact is
    /// best-effort and reported through [`ResetOutcome`]; failure to create
    /// the replacement engine is fatal.
    ///
    /// # Errors
    ///
    /// Returns an error if the fresh engine cannot be created.
    fn reset(self) -> StorageResult<(Self, ResetOutcome)>;
}

/// A forward-only cursor over one table's entries in byte order.
///
/// Cursors start unpositioned: position with [`Cursor::seek`] or
/// [`Cursor::seek_first`], then advance with [`Cursor::next`]. Advancing an
/// exhausted cursor keeps returning `None`; a new seek repositions it.
pub trait Cursor {
    /// Position at the first entry whose key is greater than or equal to
    /// `key`, and return it.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    fn seek(&mut self, key: &[u8]) -> CursorResult;

    /// Position at the first entry of the table and return it.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    fn seek_first(&mut self) -> CursorResult;

    /// Advance to the next entry and return it. An unpositioned cursor
    /// positions at the first entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    fn next(&mut self) -> CursorResult;

    /// Borrow the entry currently under the cursor, if any.
    fn current(&self) -> Option<(&[u8], &[u8])>;
}
