//! Configuration management for the edge-stream partitioner

use crate::error::{PartitionError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the edge list inside a dataset directory
pub const EDGE_LIST_FILE: &str = "edge_list.csv";

/// Name of the optional per-vertex feature file inside a dataset directory
pub const FEATURES_FILE: &str = "features.csv";

/// How the K > 1 replication passes walk the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExpansionMode {
    /// One full re-scan of the edge stream per hop per partition
    Streaming,
    /// Load the stream once and walk an in-memory reverse-adjacency index
    Indexed,
}

/// On-disk encoding of the persisted ownership table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OwnershipFormat {
    Json,
    Bincode,
}

impl OwnershipFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            OwnershipFormat::Json => "partition.json",
            OwnershipFormat::Bincode => "partition.bin",
        }
    }
}

/// Configuration shared by every partitioning strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionConfig {
    /// Dataset name, a directory under `path`
    pub dataset: String,

    /// Dataset root path
    pub path: PathBuf,

    /// Directory receiving partition files and the ownership table
    pub output_path: PathBuf,

    /// Number of partitions (P)
    pub number_partition: usize,

    /// Number of in-neighborhood hops replicated after assignment (K)
    pub k: usize,

    /// Seed for randomized strategies
    pub seed: u64,

    /// Balance weight of the HDRF score
    pub lambda: f64,

    /// Keeps the HDRF balance term finite when all loads are equal
    pub epsilon: f64,

    /// Also split the dataset's per-vertex feature file
    pub partition_features_file: bool,

    /// Write `statistics.json` next to the partitions
    pub print_partition_statistics: bool,

    pub expansion: ExpansionMode,

    pub ownership_format: OwnershipFormat,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            dataset: String::new(),
            path: PathBuf::from("datasets"),
            output_path: PathBuf::from("output"),
            number_partition: 4,
            k: 1,
            seed: 42,
            lambda: 1.0,
            epsilon: 1.0,
            partition_features_file: true,
            print_partition_statistics: true,
            expansion: ExpansionMode::Streaming,
            ownership_format: OwnershipFormat::Json,
        }
    }
}

impl PartitionConfig {
    /// Create a configuration with the required fields and defaults elsewhere
    pub fn new(
        dataset: impl Into<String>,
        path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        number_partition: usize,
    ) -> Self {
        Self {
            dataset: dataset.into(),
            path: path.into(),
            output_path: output_path.into(),
            number_partition,
            ..Self::default()
        }
    }

    /// Check every field the core algorithm depends on. Performs no I/O.
    pub fn validate(&self) -> Result<()> {
        if self.number_partition < 1 {
            return Err(PartitionError::Config(format!(
                "number_partition must be >= 1, got {}",
                self.number_partition
            )));
        }
        if !self.lambda.is_finite() || self.lambda < 0.0 {
            return Err(PartitionError::Config(format!(
                "lambda must be a finite value >= 0, got {}",
                self.lambda
            )));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(PartitionError::Config(format!(
                "epsilon must be a finite value > 0, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }

    pub fn dataset_dir(&self) -> PathBuf {
        self.path.join(&self.dataset)
    }

    pub fn edge_list_path(&self) -> PathBuf {
        self.dataset_dir().join(EDGE_LIST_FILE)
    }

    pub fn features_path(&self) -> PathBuf {
        self.dataset_dir().join(FEATURES_FILE)
    }

    pub fn ownership_path(&self) -> PathBuf {
        self.output_path.join(self.ownership_format.file_name())
    }

    pub fn statistics_path(&self) -> PathBuf {
        self.output_path.join("statistics.json")
    }
}
