//! `TallyDB` Core
//!
//! This crate provides the fundamental types and key encoding shared by the
//! `TallyDB` index and its storage backends.
//!
//! # Modules
//!
//! - [`types`] - Core data types (container IDs, composite keys, summaries)
//! - [`encoding`] - Order-preserving key and count encoding

pub mod encoding;
pub mod types;

// Re-export commonly used types
pub use types::{ContainerId, ContainerKey, ContainerSummary};
