//! Compressed reverse-adjacency index over a replayed edge stream

use std::mem;

/// In-edge lists in compressed sparse form, keyed by dense vertex index.
///
/// `offsets[v]..offsets[v + 1]` is the range of `in_edges` holding the
/// stream positions of every edge whose destination is `v`, in stream order.
#[derive(Debug, Clone, Default)]
pub struct ReverseIndex {
    /// Number of dense vertices
    pub node_count: usize,

    pub offsets: Vec<usize>,

    /// Stream positions grouped by destination
    pub in_edges: Vec<usize>,

    /// Dense source vertex of each stream position
    pub sources: Vec<u32>,
}

impl ReverseIndex {
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            node_count,
            offsets: Vec::with_capacity(node_count + 1),
            in_edges: Vec::with_capacity(edge_count),
            sources: Vec::with_capacity(edge_count),
        }
    }

    /// Stream positions of the edges entering `node`
    pub fn incoming_edges(&self, node: u32) -> &[usize] {
        let node = node as usize;
        &self.in_edges[self.offsets[node]..self.offsets[node + 1]]
    }

    pub fn source_of(&self, position: usize) -> u32 {
        self.sources[position]
    }

    pub fn in_degree(&self, node: u32) -> usize {
        let node = node as usize;
        self.offsets[node + 1] - self.offsets[node]
    }

    pub fn edge_count(&self) -> usize {
        self.sources.len()
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        mem::size_of::<Self>()
            + self.offsets.capacity() * mem::size_of::<usize>()
            + self.in_edges.capacity() * mem::size_of::<usize>()
            + self.sources.capacity() * mem::size_of::<u32>()
    }
}
