//! Vertex ownership produced by the assignment pass

use crate::graph::VertexId;
use crate::partition::PartitionId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Final owning partition of every vertex seen as a destination.
///
/// Assignments are last-write-wins: a vertex is owned by the partition chosen
/// for the last edge in stream order that has it as destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<VertexId, PartitionId>", into = "BTreeMap<VertexId, PartitionId>")]
pub struct OwnershipTable {
    owners: HashMap<VertexId, PartitionId>,
}

impl OwnershipTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `partition` as the current owner of `vertex`, replacing any earlier owner
    pub fn assign(&mut self, vertex: VertexId, partition: PartitionId) {
        self.owners.insert(vertex, partition);
    }

    pub fn owner_of(&self, vertex: VertexId) -> Option<PartitionId> {
        self.owners.get(&vertex).copied()
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Vertices owned by `partition`
    pub fn owned_by(&self, partition: PartitionId) -> HashSet<VertexId> {
        self.owners
            .iter()
            .filter(|(_, &p)| p == partition)
            .map(|(&v, _)| v)
            .collect()
    }

    /// Number of owned vertices per partition
    pub fn owned_counts(&self, num_partitions: usize) -> Vec<usize> {
        let mut counts = vec![0; num_partitions];
        for &p in self.owners.values() {
            if let Some(count) = counts.get_mut(p) {
                *count += 1;
            }
        }
        counts
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, PartitionId)> + '_ {
        self.owners.iter().map(|(&v, &p)| (v, p))
    }
}

impl From<BTreeMap<VertexId, PartitionId>> for OwnershipTable {
    fn from(sorted: BTreeMap<VertexId, PartitionId>) -> Self {
        Self {
            owners: sorted.into_iter().collect(),
        }
    }
}

impl From<OwnershipTable> for BTreeMap<VertexId, PartitionId> {
    fn from(table: OwnershipTable) -> Self {
        table.owners.into_iter().collect()
    }
}
