//! Dense vertex re-mapping and reverse index construction

use crate::graph::compressed::ReverseIndex;
use crate::graph::VertexId;
use std::collections::HashMap;

/// Maps sparse vertex ids onto contiguous indices `0..len()`.
///
/// Ids in an edge list are not required to be contiguous, so the mapping is
/// hashed; everything keyed by the dense index can then live in flat arrays.
#[derive(Debug, Clone, Default)]
pub struct VertexIndex {
    id_to_index: HashMap<VertexId, u32>,
    ids: Vec<VertexId>,
}

impl VertexIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            ids: Vec::with_capacity(capacity),
        }
    }

    /// Get the dense index of `id`, assigning the next free one if unseen.
    /// The flag is true when the vertex was inserted by this call.
    pub fn get_or_insert(&mut self, id: VertexId) -> (u32, bool) {
        if let Some(&idx) = self.id_to_index.get(&id) {
            return (idx, false);
        }
        let idx = self.ids.len() as u32;
        self.id_to_index.insert(id, idx);
        self.ids.push(id);
        (idx, true)
    }

    pub fn get(&self, id: VertexId) -> Option<u32> {
        self.id_to_index.get(&id).copied()
    }

    pub fn id_of(&self, idx: u32) -> VertexId {
        self.ids[idx as usize]
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Builder for incrementally constructing a `ReverseIndex` from a stream
#[derive(Debug, Default)]
pub struct ReverseIndexBuilder {
    vertices: VertexIndex,

    /// Dense `(src, dst)` per stream position
    edges: Vec<(u32, u32)>,

    in_degrees: Vec<usize>,
}

impl ReverseIndexBuilder {
    pub fn with_capacity(edge_count: usize) -> Self {
        Self {
            vertices: VertexIndex::with_capacity(edge_count),
            edges: Vec::with_capacity(edge_count),
            in_degrees: Vec::new(),
        }
    }

    /// Append the next edge of the stream
    pub fn add_edge(&mut self, src: VertexId, dst: VertexId) {
        let (src_idx, _) = self.vertices.get_or_insert(src);
        let (dst_idx, _) = self.vertices.get_or_insert(dst);
        self.in_degrees.resize(self.vertices.len(), 0);

        self.edges.push((src_idx, dst_idx));
        self.in_degrees[dst_idx as usize] += 1;
    }

    /// Build the index together with the vertex mapping it is keyed by
    pub fn build(self) -> (ReverseIndex, VertexIndex) {
        let node_count = self.vertices.len();
        let mut index = ReverseIndex::with_capacity(node_count, self.edges.len());

        index.offsets.push(0);
        let mut offset = 0;
        for &degree in &self.in_degrees {
            offset += degree;
            index.offsets.push(offset);
        }

        // Positions are visited in stream order, so each in-edge list stays sorted
        let mut cursor = index.offsets[..node_count].to_vec();
        index.in_edges.resize(self.edges.len(), 0);
        for (position, &(src, dst)) in self.edges.iter().enumerate() {
            let slot = &mut cursor[dst as usize];
            index.in_edges[*slot] = position;
            *slot += 1;
            index.sources.push(src);
        }

        (index, self.vertices)
    }
}
