//! Streaming edge partitioning: the strategy contract and its drivers

pub mod driver;
pub mod hdrf;
pub mod ownership;
pub mod random;

pub use driver::{partition_stream, run_assignment, AssignmentOutcome, PartitionOutcome};
pub use hdrf::{HdrfAssigner, HdrfState};
pub use ownership::OwnershipTable;
pub use random::RandomAssigner;

use crate::config::PartitionConfig;
use crate::data::features;
use crate::error::Result;
use crate::graph::{CsvEdgeStream, VertexId};
use crate::storage::{self, FilePartitionSink, PartitionReport};

/// Partition index in `0..P`
pub type PartitionId = usize;

/// Per-edge placement strategy.
///
/// The mutable bookkeeping of one run lives in `State`, created empty by
/// `init_state` and threaded through every `assign` call in stream order.
pub trait PartitionAssigner {
    type State;

    fn name(&self) -> &'static str;

    fn init_state(&self, num_partitions: usize) -> Self::State;

    /// Choose the partition for the edge `src -> dst` and update `state`
    fn assign(&self, state: &mut Self::State, src: VertexId, dst: VertexId) -> PartitionId;
}

/// A complete partitioning run: assignment pass, replication passes and the
/// files they leave under the output path.
///
/// Not re-entrant against one output directory; callers isolate output paths.
pub trait Partitioner {
    fn config(&self) -> &PartitionConfig;

    fn partition(&self) -> Result<PartitionReport>;
}

/// File-to-file partitioner driven by any `PartitionAssigner`
pub struct StreamPartitioner<A> {
    config: PartitionConfig,
    assigner: A,
}

impl<A: PartitionAssigner> StreamPartitioner<A> {
    pub fn new(config: PartitionConfig, assigner: A) -> Self {
        Self { config, assigner }
    }

    pub fn assigner(&self) -> &A {
        &self.assigner
    }
}

impl StreamPartitioner<RandomAssigner> {
    /// Randomized baseline partitioner
    pub fn random(config: PartitionConfig) -> Self {
        let assigner = RandomAssigner::new(config.seed);
        Self::new(config, assigner)
    }
}

impl StreamPartitioner<HdrfAssigner> {
    /// Degree and load aware partitioner
    pub fn hdrf(config: PartitionConfig) -> Self {
        let assigner = HdrfAssigner::new(config.lambda, config.epsilon);
        Self::new(config, assigner)
    }
}

impl<A: PartitionAssigner> Partitioner for StreamPartitioner<A> {
    fn config(&self) -> &PartitionConfig {
        &self.config
    }

    fn partition(&self) -> Result<PartitionReport> {
        let config = &self.config;
        config.validate()?;

        log::info!(
            "Partitioning dataset '{}' into {} partitions with {} (K = {})",
            config.dataset,
            config.number_partition,
            self.assigner.name(),
            config.k
        );

        let stream = CsvEdgeStream::new(config.edge_list_path());
        let mut sink = FilePartitionSink::create(&config.output_path, config.number_partition)?;
        let outcome = partition_stream(&self.assigner, config, &stream, &mut sink)?;
        let contents = sink.finish()?;

        storage::save_ownership(&outcome.ownership, &config.ownership_path(), config.ownership_format)?;

        if config.partition_features_file {
            features::partition_features(
                &config.features_path(),
                &config.output_path,
                &outcome.ownership,
                &contents,
            )?;
        }

        let report = PartitionReport::new(self.assigner.name(), config, &outcome, &contents);
        if config.print_partition_statistics {
            storage::save_statistics(&report, &config.statistics_path())?;
        }

        log::info!("Partitioning complete. Results saved to {}", config.output_path.display());
        Ok(report)
    }
}
