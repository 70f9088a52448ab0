//! Identifier type for containers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for a container.
///
/// Container IDs are unsigned 64-bit values and sort numerically. Their
/// big-endian encoding (see [`crate::encoding::keys`]) preserves that order
/// byte-wise, which is what groups a container's entries into one contiguous
/// run in the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerId(u64);

impl ContainerId {
    /// Create a new container ID from a raw value.
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value.
    #[inline]
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ContainerId {
    #[inline]
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<ContainerId> for u64 {
    #[inline]
    fn from(id: ContainerId) -> Self {
        id.as_u64()
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_id_roundtrip() {
        let id = ContainerId::new(42);
        assert_eq!(id.as_u64(), 42);
        assert_eq!(u64::from(id), 42);
        assert_eq!(ContainerId::from(42u64), id);
    }

    #[test]
    fn test_container_id_ordering() {
        assert!(ContainerId::new(1) < ContainerId::new(2));
        assert!(ContainerId::new(u64::MAX) > ContainerId::new(0));
    }

    #[test]
    fn test_container_id_display() {
        assert_eq!(ContainerId::new(7).to_string(), "7");
    }
}
