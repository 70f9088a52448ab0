//! Redb-backed storage engine.
//!
//! [Redb](https://github.com/cberner/redb) is an embedded, transactional,
//! ordered key-value store. This backend maps the engine contract onto a
//! single physical redb table whose keys carry a logical table name prefix.

mod cursor;
mod engine;
mod tables;

pub use cursor::RedbCursor;
pub use engine::{RedbConfig, RedbEngine};
