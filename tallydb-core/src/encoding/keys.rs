//! Key encoding for the container key table.
//!
//! Entry keys encode as:
//!
//! ```text
//! [container: u64 BE (8 bytes)][prefix bytes][0x00][version: i64, sign-flipped BE (8 bytes)]
//! ```
//!
//! Byte-wise comparison of encoded keys agrees with the derived ordering of
//! [`ContainerKey`]: the big-endian container ID sorts numerically, the NUL
//! terminator makes a prefix sort before every extension of itself, and
//! flipping the version's sign bit maps `i64::MIN..=i64::MAX` onto
//! `0..=u64::MAX` monotonically. Prefixes must not contain NUL for this to
//! hold; [`decode_container_key`] rejects keys whose prefix does.
//!
//! Counts are stored as eight big-endian bytes.

use crate::types::{ContainerId, ContainerKey};

/// Separator byte terminating the prefix portion of an encoded key.
pub const PREFIX_SEPARATOR: u8 = 0x00;

/// Bytes taken by the fixed portions of a key: container ID, separator, version.
const FIXED_LEN: usize = 8 + 1 + 8;

/// Encode a composite key for ordered storage.
#[inline]
#[must_use]
pub fn encode_container_key(key: &ContainerKey) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(FIXED_LEN + key.prefix.len());
    encoded.extend_from_slice(&key.container.as_u64().to_be_bytes());
    encoded.extend_from_slice(key.prefix.as_bytes());
    encoded.push(PREFIX_SEPARATOR);
    encoded.extend_from_slice(&encode_version(key.version));
    encoded
}

/// Encode the seek prefix covering every key of `container`.
///
/// The eight ID bytes compare less than or equal to every full key of the
/// container and strictly less than every key of any later container, so
/// seeking here lands on the container's first entry.
#[inline]
#[must_use]
pub fn encode_container_prefix(container: ContainerId) -> Vec<u8> {
    container.as_u64().to_be_bytes().to_vec()
}

/// Decode a composite key produced by [`encode_container_key`].
///
/// Returns `None` if the bytes are too short, the separator is missing from
/// its expected position, the prefix is not NUL-free UTF-8, or the layout is
/// otherwise violated.
#[must_use]
pub fn decode_container_key(encoded: &[u8]) -> Option<ContainerKey> {
    if encoded.len() < FIXED_LEN {
        return None;
    }
    let separator = encoded.len() - 9;
    if encoded[separator] != PREFIX_SEPARATOR {
        return None;
    }
    let container = u64::from_be_bytes(encoded[..8].try_into().ok()?);
    let prefix = std::str::from_utf8(&encoded[8..separator]).ok()?;
    if prefix.bytes().any(|b| b == PREFIX_SEPARATOR) {
        return None;
    }
    let version = decode_version(encoded[separator + 1..].try_into().ok()?);
    Some(ContainerKey::with_version(ContainerId::new(container), prefix, version))
}

/// Encode a key count as eight big-endian bytes.
#[inline]
#[must_use]
pub fn encode_count(count: u64) -> [u8; 8] {
    count.to_be_bytes()
}

/// Decode a key count. Returns `None` unless the value is exactly eight bytes.
#[inline]
#[must_use]
pub fn decode_count(value: &[u8]) -> Option<u64> {
    Some(u64::from_be_bytes(value.try_into().ok()?))
}

#[inline]
fn encode_version(version: i64) -> [u8; 8] {
    ((version as u64) ^ (1 << 63)).to_be_bytes()
}

#[inline]
fn decode_version(bytes: [u8; 8]) -> i64 {
    (u64::from_be_bytes(bytes) ^ (1 << 63)) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(container: u64, prefix: &str, version: i64) -> ContainerKey {
        ContainerKey::with_version(ContainerId::new(container), prefix, version)
    }

    #[test]
    fn test_key_roundtrip() {
        for k in [
            key(0, "", 0),
            key(1, "block", 0),
            key(42, "dir1/dir2/file", -7),
            key(u64::MAX, "z", i64::MAX),
            key(9, "key", i64::MIN),
        ] {
            let encoded = encode_container_key(&k);
            assert_eq!(decode_container_key(&encoded), Some(k));
        }
    }

    #[test]
    fn test_container_id_dominates_ordering() {
        let low = encode_container_key(&key(1, "zzz", i64::MAX));
        let high = encode_container_key(&key(2, "", i64::MIN));
        assert!(low < high);
    }

    #[test]
    fn test_prefix_extension_sorts_after() {
        let short = encode_container_key(&key(1, "a", i64::MAX));
        let long = encode_container_key(&key(1, "ab", i64::MIN));
        assert!(short < long);
    }

    #[test]
    fn test_version_sign_flip_orders_signed_values() {
        let versions = [i64::MIN, -5, -1, 0, 1, 5, i64::MAX];
        let encoded: Vec<_> = versions
            .iter()
            .map(|v| encode_container_key(&key(3, "p", *v)))
            .collect();
        let mut sorted = encoded.clone();
        sorted.sort();
        assert_eq!(encoded, sorted);
    }

    #[test]
    fn test_container_prefix_bounds_container_keys() {
        let prefix = encode_container_prefix(ContainerId::new(5));
        let first = encode_container_key(&key(5, "", i64::MIN));
        let last = encode_container_key(&key(5, "zz", i64::MAX));
        let next = encode_container_prefix(ContainerId::new(6));
        assert!(prefix.as_slice() <= first.as_slice());
        assert!(last.as_slice() < next.as_slice());
    }

    #[test]
    fn test_decode_rejects_malformed() {
        // Too short.
        assert_eq!(decode_container_key(&[0; 16]), None);
        // Separator byte missing from its expected position.
        let mut no_separator = vec![0u8; 8];
        no_separator.push(1);
        no_separator.extend_from_slice(&[0; 8]);
        assert_eq!(decode_container_key(&no_separator), None);
        // Prefix is not valid UTF-8.
        let mut bad_utf8 = vec![0u8; 8];
        bad_utf8.extend_from_slice(&[0xFF, 0xFE]);
        bad_utf8.push(PREFIX_SEPARATOR);
        bad_utf8.extend_from_slice(&[0; 8]);
        assert_eq!(decode_container_key(&bad_utf8), None);
    }

    #[test]
    fn test_nul_in_prefix_does_not_roundtrip() {
        let encoded = encode_container_key(&key(1, "a\0b", 0));
        assert_eq!(decode_container_key(&encoded), None);
    }

    #[test]
    fn test_count_roundtrip_and_length_check() {
        for count in [0u64, 1, 384, u64::MAX] {
            assert_eq!(decode_count(&encode_count(count)), Some(count));
        }
        assert_eq!(decode_count(b""), None);
        assert_eq!(decode_count(b"1234567"), None);
        assert_eq!(decode_count(b"123456789"), None);
    }
}
