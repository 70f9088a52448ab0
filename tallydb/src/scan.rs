//! Lazy scan iterators over the container key table.

use tallydb_core::encoding::keys::{decode_container_key, decode_count};
use tallydb_core::{ContainerId, ContainerKey};
use tallydb_storage::Cursor;
use tracing::warn;

use crate::error::{Error, Result};
use crate::index::TABLE_CONTAINER_KEYS;

enum ScanState {
    Seek,
    Advance,
    Done,
}

/// A lazy scan over the entries of one container, in key order.
///
/// Yields `(key, count)` pairs. The scan reads from the snapshot taken when
/// it was created, stops at the first entry of another container, and skips
/// entries it cannot decode (logging them at warn). A storage error ends the
/// scan after being yielded once.
///
/// Created by [`crate::ContainerKeyIndex::prefixes`] and
/// [`crate::ContainerKeyIndex::prefixes_after`].
pub struct PrefixScan<C> {
    cursor: C,
    container: ContainerId,
    seek_key: Vec<u8>,
    skip_prefix: Option<String>,
    state: ScanState,
}

impl<C> PrefixScan<C> {
    pub(crate) fn new(
        cursor: C,
        container: ContainerId,
        seek_key: Vec<u8>,
        skip_prefix: Option<String>,
    ) -> Self {
        Self { cursor, container, seek_key, skip_prefix, state: ScanState::Seek }
    }
}

impl<C: Cursor> Iterator for PrefixScan<C> {
    type Item = Result<(ContainerKey, u64)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let step = match self.state {
                ScanState::Done => return None,
                ScanState::Seek => {
                    self.state = ScanState::Advance;
                    self.cursor.seek(&self.seek_key)
                }
                ScanState::Advance => self.cursor.next(),
            };
            let (key_bytes, value_bytes) = match step {
                Ok(Some(entry)) => entry,
                Ok(None) => {
                    self.state = ScanState::Done;
                    return None;
                }
                Err(e) => {
                    self.state = ScanState::Done;
                    return Some(Err(e.into()));
                }
            };
            let Some(key) = decode_container_key(&key_bytes) else {
                warn!(
                    container = self.container.as_u64(),
                    "skipping undecodable key in container key table"
                );
                continue;
            };
            // Entries are grouped by container; the first foreign key ends the scan.
            if key.container != self.container {
                self.state = ScanState::Done;
                return None;
            }
            if let Some(skip) = &self.skip_prefix {
                if key.prefix == *skip {
                    continue;
                }
            }
            if key.prefix.is_empty() {
                warn!(
                    container = self.container.as_u64(),
                    "skipping empty key prefix in container key table"
                );
                continue;
            }
            let Some(count) = decode_count(&value_bytes) else {
                warn!(
                    container = self.container.as_u64(),
                    prefix = %key.prefix,
                    "skipping undecodable count in container key table"
                );
                continue;
            };
            return Some(Ok((key, count)));
        }
    }
}

/// A lazy scan over every entry of the index, in key order.
///
/// Unlike [`PrefixScan`], undecodable entries are yielded as
/// [`Error::Corrupt`] rather than skipped, and the scan continues past them.
/// A storage error ends the scan after being yielded once.
///
/// Created by [`crate::ContainerKeyIndex::scan`].
pub struct RawScan<C> {
    cursor: C,
    state: ScanState,
}

impl<C> RawScan<C> {
    pub(crate) fn new(cursor: C) -> Self {
        Self { cursor, state: ScanState::Seek }
    }
}

impl<C: Cursor> Iterator for RawScan<C> {
    type Item = Result<(ContainerKey, u64)>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = match self.state {
            ScanState::Done => return None,
            ScanState::Seek => {
                self.state = ScanState::Advance;
                self.cursor.seek_first()
            }
            ScanState::Advance => self.cursor.next(),
        };
        let (key_bytes, value_bytes) = match step {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                self.state = ScanState::Done;
                return None;
            }
            Err(e) => {
                self.state = ScanState::Done;
                return Some(Err(e.into()));
            }
        };
        let Some(key) = decode_container_key(&key_bytes) else {
            return Some(Err(Error::Corrupt {
                table: TABLE_CONTAINER_KEYS,
                detail: format!("undecodable {}-byte key", key_bytes.len()),
            }));
        };
        match decode_count(&value_bytes) {
            Some(count) => Some(Ok((key, count))),
            None => Some(Err(Error::Corrupt {
                table: TABLE_CONTAINER_KEYS,
                detail: format!(
                    "undecodable {}-byte count for container {} prefix {:?}",
                    value_bytes.len(),
                    key.container,
                    key.prefix
                ),
            })),
        }
    }
}
