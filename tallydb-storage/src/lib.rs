//! `TallyDB` Storage
//!
//! This crate defines the ordered key-value storage contract the `TallyDB`
//! index runs on, and provides the redb-backed implementation of it.
//!
//! # Modules
//!
//! - [`engine`] - The [`StorageEngine`] and [`Cursor`] traits and error types
//! - [`backends`] - Concrete engines (currently [`backends::redb`])

pub mod backends;
pub mod engine;

// Re-export the engine contract at the crate root
pub use engine::{
    Cursor, CursorResult, KeyValue, ResetOutcome, StorageEngine, StorageError, StorageResult,
};
