//! Assignment pass and full partitioning pipeline over an edge stream

use crate::config::PartitionConfig;
use crate::error::{PartitionError, Result};
use crate::graph::EdgeStream;
use crate::partition::{OwnershipTable, PartitionAssigner};
use crate::replication::{ExpansionSummary, ReplicationExpander};
use crate::storage::PartitionSink;

/// Result of the single online assignment pass
#[derive(Debug, Clone)]
pub struct AssignmentOutcome {
    pub ownership: OwnershipTable,

    /// Edges consumed from the stream
    pub edge_count: u64,

    /// Edges placed on each partition by the assignment pass
    pub base_edges: Vec<u64>,
}

/// Result of assignment followed by replication
#[derive(Debug, Clone)]
pub struct PartitionOutcome {
    pub ownership: OwnershipTable,
    pub edge_count: u64,
    pub base_edges: Vec<u64>,
    pub expansion: ExpansionSummary,
}

/// Stream every edge once through `assigner`, emitting it to the chosen
/// partition and recording that partition as the destination's owner.
pub fn run_assignment<A, S, K>(
    assigner: &A,
    num_partitions: usize,
    stream: &S,
    sink: &mut K,
) -> Result<AssignmentOutcome>
where
    A: PartitionAssigner,
    S: EdgeStream + ?Sized,
    K: PartitionSink + ?Sized,
{
    log::info!("Assignment pass over {} using {}", stream.describe(), assigner.name());

    let mut state = assigner.init_state(num_partitions);
    let mut ownership = OwnershipTable::new();
    let mut base_edges = vec![0u64; num_partitions];

    for edge in stream.scan()? {
        let edge = edge?;
        let partition = assigner.assign(&mut state, edge.src, edge.dst);
        ownership.assign(edge.dst, partition);
        sink.emit(partition, &edge)?;
        base_edges[partition] += 1;
    }

    let edge_count: u64 = base_edges.iter().sum();
    log::info!("Number of nodes: {}", ownership.len());
    log::info!("Number of edges: {}", edge_count);

    Ok(AssignmentOutcome {
        ownership,
        edge_count,
        base_edges,
    })
}

/// Assignment pass plus the K-hop replication passes configured in `config`
pub fn partition_stream<A, S, K>(
    assigner: &A,
    config: &PartitionConfig,
    stream: &S,
    sink: &mut K,
) -> Result<PartitionOutcome>
where
    A: PartitionAssigner,
    S: EdgeStream + ?Sized,
    K: PartitionSink + ?Sized,
{
    config.validate()?;
    if sink.num_partitions() != config.number_partition {
        return Err(PartitionError::Config(format!(
            "sink holds {} partitions but {} were configured",
            sink.num_partitions(),
            config.number_partition
        )));
    }

    let assignment = run_assignment(assigner, config.number_partition, stream, sink)?;

    if config.k == 0 && assignment.edge_count > 0 {
        log::warn!(
            "K = 0: partitions keep their assignment-pass edges and are not reconciled with final ownership"
        );
    }

    let expander = ReplicationExpander::new(&assignment.ownership, config.k, config.expansion);
    let expansion = expander.expand(stream, sink)?;

    Ok(PartitionOutcome {
        ownership: assignment.ownership,
        edge_count: assignment.edge_count,
        base_edges: assignment.base_edges,
        expansion,
    })
}
