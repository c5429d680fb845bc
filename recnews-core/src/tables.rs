use crate::{ClusterAssignment, Interaction, Item};

/// Raw tables of one data snapshot, as produced by a loader.
///
/// Row order matters: identifier indices and ranking tie-breaks follow it.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapshotTables {
    /// User/item engagement events.
    pub interactions: Vec<Interaction>,
    /// Item catalogue rows.
    pub items: Vec<Item>,
    /// Cluster-assignment rows.
    pub clusters: Vec<ClusterAssignment>,
}
