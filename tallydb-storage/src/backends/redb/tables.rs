//! Table definitions and key prefixing for the redb backend.
//!
//! Redb requires statically typed table definitions, while the engine
//! contract exposes dynamically named logical tables. All data therefore
//! lives in a single physical table, with each key prefixed by its logical
//! table name and a separator byte. Logical table names must not contain the
//! separator; keys may.

use redb::TableDefinition;

/// The single physical table holding all logical tables' data.
pub const DATA_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("tally_data");

/// Separator between the logical table name and the key.
pub const KEY_SEPARATOR: u8 = 0x00;

/// Encode a key with its logical table name prefix.
pub fn encode_table_key(table: &str, key: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(table.len() + 1 + key.len());
    encoded.extend_from_slice(table.as_bytes());
    encoded.push(KEY_SEPARATOR);
    encoded.extend_from_slice(key);
    encoded
}

/// Split a physical key back into its logical table name and key.
pub fn decode_table_key(encoded: &[u8]) -> Option<(&str, &[u8])> {
    let separator = encoded.iter().position(|&b| b == KEY_SEPARATOR)?;
    let table = std::str::from_utf8(&encoded[..separator]).ok()?;
    Some((table, &encoded[separator + 1..]))
}

/// The inclusive lower bound of a logical table's physical key range.
pub fn table_start_key(table: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(table.len() + 1);
    key.extend_from_slice(table.as_bytes());
    key.push(KEY_SEPARATOR);
    key
}

/// The exclusive upper bound of a logical table's physical key range.
pub fn table_end_key(table: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(table.len() + 1);
    key.extend_from_slice(table.as_bytes());
    key.push(KEY_SEPARATOR + 1);
    key
}
