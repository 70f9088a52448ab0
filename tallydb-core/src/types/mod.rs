//! Core data types for `TallyDB`.
//!
//! This module defines the identifiers and composite keys that the index
//! stores, plus the per-container aggregate returned by pagination.

mod id;
mod key;
mod summary;

pub use id::ContainerId;
pub use key::ContainerKey;
pub use summary::ContainerSummary;
