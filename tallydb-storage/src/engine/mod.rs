//! Storage engine traits and errors.

mod error;
mod traits;

pub use error::{StorageError, StorageResult};
pub use traits::{Cursor, CursorResult, KeyValue, ResetOutcome, StorageEngine};
