//! Generic conformance suite for storage engines.
//!
//! Any [`StorageEngine`] implementation can be exercised by implementing
//! [`TestHarness`] and calling [`run_test_suite`]. Backend-specific behavior
//! (file handling, batching) belongs in the backend's own test file.

use tallydb_storage::{Cursor, ResetOutcome, StorageEngine};

/// Creates engines for the generic suite.
pub trait TestHarness {
    type Engine: StorageEngine;

    /// Create a fresh, empty engine.
    fn create_engine() -> Self::Engine;
}

/// Run every generic test against a harness.
pub fn run_test_suite<H: TestHarness>() {
    test_basic_operations::<H>();
    test_table_isolation::<H>();
    test_cursor_iterates_in_byte_order::<H>();
    test_cursor_seek_semantics::<H>();
    test_cursor_snapshot_isolation::<H>();
    test_cursor_on_missing_table::<H>();
    test_cursor_exhaustion_is_terminal::<H>();
    test_unpositioned_next_starts_at_first::<H>();
    test_reset_yields_empty_engine::<H>();
}

const TABLE: &str = "suite";

/// Put, get, overwrite, and delete behave as a map.
pub fn test_basic_operations<H: TestHarness>() {
    let engine = H::create_engine();
    assert_eq!(engine.get(TABLE, b"k1").expect("get"), None);
    engine.put(TABLE, b"k1", b"v1").expect("put");
    assert_eq!(engine.get(TABLE, b"k1").expect("get"), Some(b"v1".to_vec()));
    engine.put(TABLE, b"k1", b"v2").expect("overwrite");
    assert_eq!(engine.get(TABLE, b"k1").expect("get"), Some(b"v2".to_vec()));
    assert!(engine.delete(TABLE, b"k1").expect("delete"));
    assert_eq!(engine.get(TABLE, b"k1").expect("get"), None);
    assert!(!engine.delete(TABLE, b"k1").expect("delete absent"));
}

/// Logical tables do not leak into each other.
pub fn test_table_isolation<H: TestHarness>() {
    let engine = H::create_engine();
    engine.put("alpha", b"k", b"from-alpha").expect("put");
    engine.put("beta", b"k", b"from-beta").expect("put");
    assert_eq!(engine.get("alpha", b"k").expect("get"), Some(b"from-alpha".to_vec()));
    assert_eq!(engine.get("beta", b"k").expect("get"), Some(b"from-beta".to_vec()));

    let mut cursor = engine.cursor("alpha").expect("cursor");
    let entry = cursor.seek_first().expect("seek").expect("entry");
    assert_eq!(entry, (b"k".to_vec(), b"from-alpha".to_vec()));
    assert_eq!(cursor.next().expect("next"), None);

    assert!(engine.delete("alpha", b"k").expect("delete"));
    assert_eq!(engine.get("beta", b"k").expect("get"), Some(b"from-beta".to_vec()));
}

/// Cursors yield entries in ascending byte order regardless of write order.
pub fn test_cursor_iterates_in_byte_order<H: TestHarness>() {
    let engine = H::create_engine();
    let keys = [b"b".as_slice(), b"a", b"zz", b"ab", b"\x00", b"z"];
    for key in keys {
        engine.put(TABLE, key, b"v").expect("put");
    }
    let mut cursor = engine.cursor(TABLE).expect("cursor");
    let mut seen = Vec::new();
    let mut entry = cursor.seek_first().expect("seek");
    while let Some((key, _)) = entry {
        seen.push(key);
        entry = cursor.next().expect("next");
    }
    let mut expected: Vec<Vec<u8>> = keys.iter().map(|k| k.to_vec()).collect();
    expected.sort();
    assert_eq!(seen, expected);
}

/// Seek lands on the first key greater than or equal to the target.
pub fn test_cursor_seek_semantics<H: TestHarness>() {
    let engine = H::create_engine();
    for key in [b"b".as_slice(), b"d", b"f"] {
        engine.put(TABLE, key, b"v").expect("put");
    }
    let mut cursor = engine.cursor(TABLE).expect("cursor");

    let entry = cursor.seek(b"d").expect("seek").expect("exact hit");
    assert_eq!(entry.0, b"d".to_vec());
    assert_eq!(cursor.current().map(|(k, _)| k.to_vec()), Some(b"d".to_vec()));

    let entry = cursor.seek(b"c").expect("seek").expect("between keys");
    assert_eq!(entry.0, b"d".to_vec());

    let entry = cursor.seek(b"a").expect("seek").expect("before first");
    assert_eq!(entry.0, b"b".to_vec());
    let entry = cursor.next().expect("next").expect("entry");
    assert_eq!(entry.0, b"d".to_vec());

    assert_eq!(cursor.seek(b"g").expect("seek past last"), None);
    assert_eq!(cursor.current(), None);

    // A new seek repositions an exhausted cursor.
    let entry = cursor.seek(b"b").expect("seek").expect("entry");
    assert_eq!(entry.0, b"b".to_vec());
}

/// An open cursor is unaffected by writes made after it was opened.
pub fn test_cursor_snapshot_isolation<H: TestHarness>() {
    let engine = H::create_engine();
    engine.put(TABLE, b"k1", b"v1").expect("put");
    let mut cursor = engine.cursor(TABLE).expect("cursor");

    engine.put(TABLE, b"k2", b"v2").expect("put after cursor");
    engine.put(TABLE, b"k1", b"v1-rewritten").expect("overwrite after cursor");

    let entry = cursor.seek_first().expect("seek").expect("entry");
    assert_eq!(entry, (b"k1".to_vec(), b"v1".to_vec()));
    assert_eq!(cursor.next().expect("next"), None);

    // A cursor opened afterwards sees both writes.
    let mut fresh = engine.cursor(TABLE).expect("cursor");
    let entry = fresh.seek_first().expect("seek").expect("entry");
    assert_eq!(entry, (b"k1".to_vec(), b"v1-rewritten".to_vec()));
    let entry = fresh.next().expect("next").expect("entry");
    assert_eq!(entry.0, b"k2".to_vec());
}

/// A table that was never written reads as empty, not as an error.
pub fn test_cursor_on_missing_table<H: TestHarness>() {
    let engine = H::create_engine();
    assert_eq!(engine.get("missing", b"k").expect("get"), None);
    assert!(!engine.delete("missing", b"k").expect("delete"));
    let mut cursor = engine.cursor("missing").expect("cursor");
    assert_eq!(cursor.seek_first().expect("seek"), None);
    assert_eq!(cursor.next().expect("next"), None);
}

/// Advancing past the end keeps returning `None`.
pub fn test_cursor_exhaustion_is_terminal<H: TestHarness>() {
    let engine = H::create_engine();
    engine.put(TABLE, b"only", b"v").expect("put");
    let mut cursor = engine.cursor(TABLE).expect("cursor");
    assert!(cursor.seek_first().expect("seek").is_some());
    assert_eq!(cursor.next().expect("next"), None);
    assert_eq!(cursor.next().expect("next again"), None);
    assert_eq!(cursor.current(), None);
}

/// `next` on an unpositioned cursor starts at the first entry.
pub fn test_unpositioned_next_starts_at_first<H: TestHarness>() {
    let engine = H::create_engine();
    engine.put(TABLE, b"k1", b"v1").expect("put");
    engine.put(TABLE, b"k2", b"v2").expect("put");
    let mut cursor = engine.cursor(TABLE).expect("cursor");
    let entry = cursor.next().expect("next").expect("entry");
    assert_eq!(entry.0, b"k1".to_vec());
}

/// Reset destroys all tables and hands back a usable empty engine.
pub fn test_reset_yields_empty_engine<H: TestHarness>() {
    let engine = H::create_engine();
    engine.put(TABLE, b"k1", b"v1").expect("put");
    engine.put("other", b"k2", b"v2").expect("put");

    let (engine, outcome) = engine.reset().expect("reset");
    assert!(outcome.is_clean(), "healthy reset leaves no stale artifact");
    assert_eq!(engine.get(TABLE, b"k1").expect("get"), None);
    assert_eq!(engine.get("other", b"k2").expect("get"), None);
    let mut cursor = engine.cursor(TABLE).expect("cursor");
    assert_eq!(cursor.seek_first().expect("seek"), None);

    engine.put(TABLE, b"k3", b"v3").expect("put after reset");
    assert_eq!(engine.get(TABLE, b"k3").expect("get"), Some(b"v3".to_vec()));
}

#[test]
fn test_cursor_is_object_safe() {
    fn _takes_dyn(_: &mut dyn Cursor) {}
}

#[test]
fn test_reset_outcome_default_is_clean() {
    assert!(ResetOutcome::default().is_clean());
}
