//! K-hop neighborhood replication after ownership is final

use crate::config::ExpansionMode;
use crate::error::{PartitionError, Result};
use crate::graph::algorithms::reverse_expand;
use crate::graph::{Edge, EdgeStream, ReverseIndexBuilder, VertexId};
use crate::partition::{OwnershipTable, PartitionId};
use crate::storage::PartitionSink;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;

/// One hop of the reversed breadth-first expansion of one partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HopTrace {
    pub partition: PartitionId,

    /// 1-based hop number
    pub hop: usize,

    /// Vertices whose in-edges this hop pulled
    pub frontier_size: usize,

    pub edges_emitted: u64,
}

/// What the replication passes added on top of the assignment pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpansionSummary {
    pub edges_emitted: u64,

    /// Per-hop detail, K entries per partition when K > 1
    pub hops: Vec<HopTrace>,
}

/// Materializes each partition's K-hop in-neighborhood closure.
///
/// - K = 0: nothing is emitted.
/// - K = 1: one re-scan sends every edge to its destination's final owner.
/// - K > 1: for every partition, starting from the vertices it owns, K
///   rounds each pull every edge entering the frontier and move the frontier
///   to those edges' sources.
///
/// Output depends only on the stream, the ownership table and K, so
/// running the expander again emits the same edges again.
pub struct ReplicationExpander<'a> {
    ownership: &'a OwnershipTable,
    hops: usize,
    mode: ExpansionMode,
}

impl<'a> ReplicationExpander<'a> {
    pub fn new(ownership: &'a OwnershipTable, hops: usize, mode: ExpansionMode) -> Self {
        Self {
            ownership,
            hops,
            mode,
        }
    }

    pub fn expand<S, K>(&self, stream: &S, sink: &mut K) -> Result<ExpansionSummary>
    where
        S: EdgeStream + ?Sized,
        K: PartitionSink + ?Sized,
    {
        match (self.hops, self.mode) {
            (0, _) => Ok(ExpansionSummary::default()),
            (1, _) => self.rehome(stream, sink),
            (_, ExpansionMode::Streaming) => self.expand_streaming(stream, sink),
            (_, ExpansionMode::Indexed) => self.expand_indexed(stream, sink),
        }
    }

    fn owner(&self, vertex: VertexId) -> Result<PartitionId> {
        self.ownership
            .owner_of(vertex)
            .ok_or(PartitionError::UnownedVertex { vertex })
    }

    /// Re-emit every edge into the partition owning its destination
    fn rehome<S, K>(&self, stream: &S, sink: &mut K) -> Result<ExpansionSummary>
    where
        S: EdgeStream + ?Sized,
        K: PartitionSink + ?Sized,
    {
        log::info!("Replicating 1-hop neighborhoods from {}", stream.describe());

        let mut summary = ExpansionSummary::default();
        for edge in stream.scan()? {
            let edge = edge?;
            sink.emit(self.owner(edge.dst)?, &edge)?;
            summary.edges_emitted += 1;
        }
        Ok(summary)
    }

    /// Bounded-memory expansion: one full stream scan per hop per partition
    fn expand_streaming<S, K>(&self, stream: &S, sink: &mut K) -> Result<ExpansionSummary>
    where
        S: EdgeStream + ?Sized,
        K: PartitionSink + ?Sized,
    {
        log::info!(
            "Replicating {}-hop neighborhoods by re-scanning {}",
            self.hops,
            stream.describe()
        );

        let mut summary = ExpansionSummary::default();
        for partition in 0..sink.num_partitions() {
            let mut node_set = self.ownership.owned_by(partition);

            for hop in 1..=self.hops {
                let mut frontier: HashSet<VertexId> = HashSet::new();
                let mut emitted = 0u64;

                if !node_set.is_empty() {
                    for edge in stream.scan()? {
                        let edge = edge?;
                        if node_set.contains(&edge.dst) {
                            sink.emit(partition, &edge)?;
                            frontier.insert(edge.src);
                            emitted += 1;
                        }
                    }
                }

                log::debug!(
                    "Partition {} hop {}: frontier {} -> {} edges",
                    partition,
                    hop,
                    node_set.len(),
                    emitted
                );
                summary.hops.push(HopTrace {
                    partition,
                    hop,
                    frontier_size: node_set.len(),
                    edges_emitted: emitted,
                });
                summary.edges_emitted += emitted;
                node_set = frontier;
            }
        }
        Ok(summary)
    }

    /// In-memory expansion over a reverse-adjacency index, partitions walked in parallel
    fn expand_indexed<S, K>(&self, stream: &S, sink: &mut K) -> Result<ExpansionSummary>
    where
        S: EdgeStream + ?Sized,
        K: PartitionSink + ?Sized,
    {
        let edges: Vec<Edge> = stream.scan()?.collect::<Result<_>>()?;

        let mut builder = ReverseIndexBuilder::with_capacity(edges.len());
        for edge in &edges {
            builder.add_edge(edge.src, edge.dst);
        }
        let (index, vertices) = builder.build();
        log::info!(
            "Replicating {}-hop neighborhoods over an index of {} vertices ({} bytes)",
            self.hops,
            vertices.len(),
            index.memory_usage()
        );

        let num_partitions = sink.num_partitions();
        let mut seeds: Vec<Vec<u32>> = vec![Vec::new(); num_partitions];
        for (vertex, partition) in self.ownership.iter() {
            let idx = vertices
                .get(vertex)
                .ok_or(PartitionError::UnownedVertex { vertex })?;
            if let Some(seed) = seeds.get_mut(partition) {
                seed.push(idx);
            }
        }

        let rounds: Vec<_> = seeds
            .par_iter()
            .map(|seed| reverse_expand(&index, seed, self.hops))
            .collect();

        let mut summary = ExpansionSummary::default();
        for (partition, partition_rounds) in rounds.into_iter().enumerate() {
            for (round, hop_edges) in partition_rounds.into_iter().enumerate() {
                for &position in &hop_edges.positions {
                    sink.emit(partition, &edges[position])?;
                }
                let emitted = hop_edges.positions.len() as u64;
                summary.hops.push(HopTrace {
                    partition,
                    hop: round + 1,
                    frontier_size: hop_edges.frontier_size,
                    edges_emitted: emitted,
                });
                summary.edges_emitted += emitted;
            }
        }
        Ok(summary)
    }
}
