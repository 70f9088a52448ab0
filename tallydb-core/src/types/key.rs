//! Composite keys identifying a key prefix within a container.

use serde::{Deserialize, Serialize};

use super::ContainerId;

/// A composite key addressing one key prefix (at one version) in a container.
///
/// Keys order by container ID first, then by prefix (byte-lexicographic),
/// then by version (signed, ascending). The derived `Ord` matches the byte
/// order of the encoded form produced by
/// [`crate::encoding::keys::encode_container_key`], so sorting keys in memory
/// and scanning their encodings in the store agree.
///
/// Prefixes must not contain NUL (`0x00`): the encoding uses NUL to terminate
/// the prefix, and keys violating this do not round-trip through decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerKey {
    /// The container this key belongs to.
    pub container: ContainerId,
    /// The key prefix within the container. May be empty.
    pub prefix: String,
    /// The version of the prefix. Defaults to zero for unversioned entries.
    pub version: i64,
}

impl ContainerKey {
    /// Create an unversioned key (version zero).
    #[must_use]
    pub fn new(container: ContainerId, prefix: impl Into<String>) -> Self {
        Self::with_version(container, prefix, 0)
    }

    /// Create a key carrying an explicit version.
    #[must_use]
    pub fn with_version(container: ContainerId, prefix: impl Into<String>, version: i64) -> Self {
        Self { container, prefix: prefix.into(), version }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_to_version_zero() {
        let key = ContainerKey::new(ContainerId::new(1), "block");
        assert_eq!(key.version, 0);
        assert_eq!(key.prefix, "block");
    }

    #[test]
    fn test_ordering_by_container_then_prefix_then_version() {
        let a = ContainerKey::with_version(ContainerId::new(1), "b", 9);
        let b = ContainerKey::with_version(ContainerId::new(2), "a", 0);
        assert!(a < b);

        let c = ContainerKey::with_version(ContainerId::new(1), "a", 5);
        let d = ContainerKey::with_version(ContainerId::new(1), "ab", -5);
        assert!(c < d);

        let e = ContainerKey::with_version(ContainerId::new(1), "a", -1);
        let f = ContainerKey::with_version(ContainerId::new(1), "a", 1);
        assert!(e < f);
    }
}
