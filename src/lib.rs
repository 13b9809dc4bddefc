//! Streaming edge partitioning with K-hop neighborhood replication for
//! partition-local graph neural network computation

pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod partition;
pub mod replication;
pub mod storage;

pub use config::{ExpansionMode, OwnershipFormat, PartitionConfig};
pub use error::{PartitionError, Result};
pub use graph::{CsvEdgeStream, Edge, EdgeStream, MemoryEdgeStream, VertexId};
pub use partition::{
    partition_stream, HdrfAssigner, OwnershipTable, PartitionAssigner, PartitionId, Partitioner,
    RandomAssigner, StreamPartitioner,
};
pub use replication::{ExpansionSummary, HopTrace, ReplicationExpander};
pub use storage::{FilePartitionSink, MemoryPartitionSink, PartitionReport, PartitionSink};
