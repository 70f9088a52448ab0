//! Per-container aggregates produced by pagination.

use serde::{Deserialize, Serialize};

use super::ContainerId;

/// The aggregate view of one container: how many keys its entries count.
///
/// Produced by paginated container listing, which sums the counts of all
/// entries sharing a container ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSummary {
    /// The container being summarized.
    pub container: ContainerId,
    /// The total key count across every entry of the container.
    pub key_count: u64,
}
