//! Configuration for opening a file-backed index.

use std::path::PathBuf;

/// Configuration for a file-backed index.
///
/// # Example
///
/// ```ignore
/// let config = Config::new("/var/lib/tallydb/index.redb").cache_size(64 * 1024 * 1024);
/// let index = ContainerKeyIndex::open_with_config(config)?;
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the database file.
    pub path: PathBuf,
    /// Storage cache size in bytes. `None` uses the backend default.
    pub cache_size: Option<usize>,
}

impl Config {
    /// Create a configuration for the database file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), cache_size: None }
    }

    /// Set the storage cache size in bytes.
    #[must_use]
    pub const fn cache_size(mut self, bytes: usize) -> Self {
        self.cache_size = Some(bytes);
        self
    }
}
