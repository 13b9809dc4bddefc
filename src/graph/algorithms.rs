//! Graph walks over the reverse-adjacency index

use crate::graph::compressed::ReverseIndex;
use std::collections::HashSet;

/// Edges collected by one hop of a reversed breadth-first expansion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopEdges {
    /// Number of vertices whose in-edges were pulled during this hop
    pub frontier_size: usize,

    /// Stream positions of the pulled edges, ascending
    pub positions: Vec<usize>,
}

/// Expand `seeds` along reversed edges for exactly `hops` rounds.
///
/// Round `h` pulls every in-edge of the current frontier and makes the set of
/// their sources the next frontier. Once the frontier is empty the remaining
/// rounds are recorded with no edges.
pub fn reverse_expand(index: &ReverseIndex, seeds: &[u32], hops: usize) -> Vec<HopEdges> {
    let mut frontier: HashSet<u32> = seeds.iter().copied().collect();
    let mut rounds = Vec::with_capacity(hops);

    for _ in 0..hops {
        let mut positions = Vec::new();
        let mut next = HashSet::new();

        for &node in &frontier {
            for &position in index.incoming_edges(node) {
                positions.push(position);
                next.insert(index.source_of(position));
            }
        }
        positions.sort_unstable();

        rounds.push(HopEdges {
            frontier_size: frontier.len(),
            positions,
        });
        frontier = next;
    }

    rounds
}
