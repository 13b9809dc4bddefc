//! Results persistence module

pub mod sink;

pub use sink::{
    partition_file_name, FilePartitionSink, MemoryPartitionSink, PartitionContents, PartitionSink,
};

use crate::config::{OwnershipFormat, PartitionConfig};
use crate::error::{PartitionError, Result};
use crate::partition::{OwnershipTable, PartitionOutcome};
use crate::replication::HopTrace;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Persist the ownership table so a downstream loader can find each vertex's owner
pub fn save_ownership(ownership: &OwnershipTable, path: &Path, format: OwnershipFormat) -> Result<()> {
    log::info!("Saving ownership of {} vertices to {}", ownership.len(), path.display());

    let file = File::create(path).map_err(|e| PartitionError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    match format {
        OwnershipFormat::Json => serde_json::to_writer(&mut writer, ownership).map_err(|e| {
            PartitionError::Serialize {
                what: path.display().to_string(),
                message: e.to_string(),
            }
        })?,
        OwnershipFormat::Bincode => bincode::serialize_into(&mut writer, ownership).map_err(|e| {
            PartitionError::Serialize {
                what: path.display().to_string(),
                message: e.to_string(),
            }
        })?,
    }
    writer.flush().map_err(|e| PartitionError::io(path, e))
}

/// Read back an ownership table written by `save_ownership`
pub fn load_ownership(path: &Path, format: OwnershipFormat) -> Result<OwnershipTable> {
    let file = File::open(path).map_err(|e| PartitionError::io(path, e))?;
    let reader = BufReader::new(file);
    let deserialize_error = |message: String| PartitionError::Serialize {
        what: path.display().to_string(),
        message,
    };
    match format {
        OwnershipFormat::Json => {
            serde_json::from_reader(reader).map_err(|e| deserialize_error(e.to_string()))
        }
        OwnershipFormat::Bincode => {
            bincode::deserialize_from(reader).map_err(|e| deserialize_error(e.to_string()))
        }
    }
}

/// Counts describing one finished run
#[derive(Debug, Clone, Serialize)]
pub struct PartitionReport {
    pub method: String,
    pub config: PartitionConfig,

    /// Edges in the input stream
    pub edge_count: u64,

    /// Distinct destination vertices, i.e. owned vertices
    pub node_count: usize,

    /// Edges placed on each partition by the assignment pass
    pub base_edges: Vec<u64>,

    /// Edges written to each partition file, replication included
    pub total_edges: Vec<u64>,

    pub replicated_edges: u64,

    pub owned_vertices: Vec<usize>,

    /// Distinct vertices appearing in each partition file
    pub partition_vertices: Vec<usize>,

    /// Sum of per-partition distinct vertices over distinct vertices overall
    pub replication_factor: f64,

    pub hops: Vec<HopTrace>,
}

impl PartitionReport {
    pub fn new(
        method: &str,
        config: &PartitionConfig,
        outcome: &PartitionOutcome,
        contents: &PartitionContents,
    ) -> Self {
        let partition_vertices: Vec<usize> = contents.vertices.iter().map(|v| v.len()).collect();
        let distinct = contents.distinct_vertices();
        let replication_factor = if distinct == 0 {
            0.0
        } else {
            partition_vertices.iter().sum::<usize>() as f64 / distinct as f64
        };

        Self {
            method: method.to_string(),
            config: config.clone(),
            edge_count: outcome.edge_count,
            node_count: outcome.ownership.len(),
            base_edges: outcome.base_edges.clone(),
            total_edges: contents.edge_counts.clone(),
            replicated_edges: outcome.expansion.edges_emitted,
            owned_vertices: outcome.ownership.owned_counts(contents.num_partitions()),
            partition_vertices,
            replication_factor,
            hops: outcome.expansion.hops.clone(),
        }
    }
}

/// Save the run statistics as pretty JSON
pub fn save_statistics(report: &PartitionReport, path: &Path) -> Result<()> {
    log::info!("Saving partition statistics to {}", path.display());

    let json = serde_json::to_string_pretty(report).map_err(|e| PartitionError::Serialize {
        what: "partition statistics".to_string(),
        message: e.to_string(),
    })?;
    let mut file = File::create(path).map_err(|e| PartitionError::io(path, e))?;
    file.write_all(json.as_bytes())
        .map_err(|e| PartitionError::io(path, e))
}
