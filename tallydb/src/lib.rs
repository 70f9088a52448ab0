//! `TallyDB`
//!
//! An embedded secondary index that tracks, per container, which key
//! prefixes exist and how many keys each one counts. Entries are
//! `(container, key prefix, version) -> count` and live in an ordered
//! key-value store under an order-preserving encoding, which makes the two
//! read paths cheap:
//!
//! - **Per-container scans** - every prefix of one container, in order,
//!   optionally resuming after a previous prefix
//! - **Container listing** - all containers with their summed key counts,
//!   paginated by container ID
//!
//! The whole index can be rebuilt from a full replacement snapshot, which
//! destroys the backing store and reloads it.
//!
//! # Example
//!
//! ```ignore
//! use tallydb::{ContainerId, ContainerKey, ContainerKeyIndex};
//!
//! let index = ContainerKeyIndex::open("/var/lib/tallydb/index.redb")?;
//! index.put_count(&ContainerKey::new(ContainerId::new(1), "block_0001"), 24)?;
//!
//! for summary in index.containers(100, ContainerId::new(0))? {
//!     println!("container {}: {} keys", summary.container, summary.key_count);
//! }
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod scan;

pub use config::Config;
pub use error::{Error, Result};
pub use index::{ContainerKeyIndex, TABLE_CONTAINER_KEYS};
pub use scan::{PrefixScan, RawScan};

// Re-export the core types and the storage contract
pub use tallydb_core::{ContainerId, ContainerKey, ContainerSummary};
pub use tallydb_storage::backends::redb::{RedbConfig, RedbEngine};
pub use tallydb_storage::{Cursor, ResetOutcome, StorageEngine, StorageError};
