//! Batched streaming cursor for the redb backend.
//!
//! Redb range iterators borrow the transaction they came from and cannot be
//! held across engine calls. The cursor instead owns a read transaction and
//! pulls entries in batches, re-opening a range from the last seen key
//! whenever a batch runs out. The owned transaction pins one snapshot, so
//! every batch observes the same data regardless of concurrent writes.

use std::ops::Bound;

use redb::{ReadTransaction, TableError};

use crate::engine::{Cursor, CursorResult, KeyValue, StorageError, StorageResult};

use super::tables::{decode_table_key, encode_table_key, table_end_key, table_start_key, DATA_TABLE};

/// Number of entries fetched from redb per batch.
const DEFAULT_BATCH_SIZE: usize = 1000;

/// A forward cursor over one logical table's entries in byte order.
pub struct RedbCursor {
    tx: ReadTransaction,
    table: String,
    batch: Vec<KeyValue>,
    position: usize,
    has_more: bool,
    started: bool,
    current: Option<KeyValue>,
}

impl RedbCursor {
    pub(super) fn new(tx: ReadTransaction, table: String) -> Self {
        Self {
            tx,
            table,
            batch: Vec::new(),
            position: 0,
            has_more: false,
            started: false,
            current: None,
        }
    }

    /// Fetch up to one batch of entries beginning at `start`.
    fn fetch_batch(&self, start: Bound<&[u8]>) -> StorageResult<Vec<KeyValue>> {
        let data = match self.tx.open_table(DATA_TABLE) {
            Ok(data) => data,
            // A missing data table means nothing was ever written.
            Err(TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::Internal(e.to_string())),
        };
        let (lower, skip_exact) = match start {
            Bound::Unbounded => (table_start_key(&self.table), None),
            Bound::Included(key) => (encode_table_key(&self.table, key), None),
            Bound::Excluded(key) => (encode_table_key(&self.table, key), Some(key.to_vec())),
        };
        let upper = table_end_key(&self.table);
        let range = data
            .range(lower.as_slice()..upper.as_slice())
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        let mut entries = Vec::new();
        for item in range {
            if entries.len() >= DEFAULT_BATCH_SIZE {
                break;
            }
            let (key_guard, value_guard) = item.map_err(|e| StorageError::Internal(e.to_string()))?;
            let Some((_, key)) = decode_table_key(key_guard.value()) else {
                continue;
            };
            // An excluded bound still lands the range on its own key.
            if let Some(skip) = &skip_exact {
                if key == skip.as_slice() {
                    continue;
                }
            }
            entries.push((key.to_vec(), value_guard.value().to_vec()));
        }
        Ok(entries)
    }

    fn load_batch(&mut self, start: Bound<&[u8]>) -> CursorResult {
        let batch = self.fetch_batch(start)?;
        self.has_more = batch.len() >= DEFAULT_BATCH_SIZE;
        self.batch = batch;
        self.position = 0;
        self.started = true;
        self.current = self.batch.first().cloned();
        Ok(self.current.clone())
    }
}

impl Cursor for RedbCursor {
    fn seek(&mut self, key: &[u8]) -> CursorResult {
        self.load_batch(Bound::Included(key))
    }

    fn seek_first(&mut self) -> CursorResult {
        self.load_batch(Bound::Unbounded)
    }

    fn next(&mut self) -> CursorResult {
        if !self.started {
            return self.seek_first();
        }
        // Exhaustion is terminal.
        let Some((last_key, _)) = self.current.clone() else {
            return Ok(None);
        };
        if self.position + 1 < self.batch.len() {
            self.position += 1;
            self.current = self.batch.get(self.position).cloned();
            return Ok(self.current.clone());
        }
        if !self.has_more {
            self.current = None;
            return Ok(None);
        }
        self.load_batch(Bound::Excluded(last_key.as_slice()))
    }

    fn current(&self) -> Option<(&[u8], &[u8])> {
        self.current.as_ref().map(|(key, value)| (key.as_slice(), value.as_slice()))
    }
}
