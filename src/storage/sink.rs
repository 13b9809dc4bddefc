//! Per-partition edge sinks

use crate::error::{PartitionError, Result};
use crate::graph::{Edge, VertexId};
use crate::partition::PartitionId;
use std::collections::HashSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Appends edges to per-partition storage
pub trait PartitionSink {
    fn num_partitions(&self) -> usize;

    fn emit(&mut self, partition: PartitionId, edge: &Edge) -> Result<()>;

    /// What has been emitted so far
    fn contents(&self) -> &PartitionContents;
}

/// Running tally of what each partition received
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionContents {
    /// Edges emitted per partition, duplicates included
    pub edge_counts: Vec<u64>,

    /// Distinct vertices appearing in each partition's edges
    pub vertices: Vec<HashSet<VertexId>>,
}

impl PartitionContents {
    pub fn new(num_partitions: usize) -> Self {
        Self {
            edge_counts: vec![0; num_partitions],
            vertices: vec![HashSet::new(); num_partitions],
        }
    }

    fn record(&mut self, partition: PartitionId, edge: &Edge) -> Result<()> {
        let count = self.edge_counts.get_mut(partition).ok_or_else(|| {
            PartitionError::Config(format!("partition {} is out of range", partition))
        })?;
        *count += 1;
        let vertices = &mut self.vertices[partition];
        vertices.insert(edge.src);
        vertices.insert(edge.dst);
        Ok(())
    }

    pub fn num_partitions(&self) -> usize {
        self.edge_counts.len()
    }

    /// Distinct vertices across all partitions
    pub fn distinct_vertices(&self) -> usize {
        let mut all: HashSet<VertexId> = HashSet::new();
        for vertices in &self.vertices {
            all.extend(vertices.iter().copied());
        }
        all.len()
    }
}

/// Name of partition `i`'s edge list
pub fn partition_file_name(partition: PartitionId) -> String {
    format!("partition_{}.txt", partition)
}

/// Space-delimited edge list files `partition_<i>.txt`, one per partition.
///
/// All writers are opened by `create`; if any one fails the rest are dropped
/// and closed before the error is returned.
pub struct FilePartitionSink {
    paths: Vec<PathBuf>,
    writers: Vec<csv::Writer<File>>,
    contents: PartitionContents,
}

impl FilePartitionSink {
    pub fn create(output_dir: &Path, num_partitions: usize) -> Result<Self> {
        fs::create_dir_all(output_dir).map_err(|e| PartitionError::io(output_dir, e))?;

        let paths: Vec<PathBuf> = (0..num_partitions)
            .map(|p| output_dir.join(partition_file_name(p)))
            .collect();

        let writers = paths
            .iter()
            .map(|path| {
                let file = File::create(path).map_err(|e| PartitionError::io(path, e))?;
                Ok(csv::WriterBuilder::new()
                    .delimiter(b' ')
                    .has_headers(false)
                    .flexible(true)
                    .from_writer(file))
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Opened {} partition files under {}", num_partitions, output_dir.display());

        Ok(Self {
            paths,
            writers,
            contents: PartitionContents::new(num_partitions),
        })
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Flush and close every partition file
    pub fn finish(mut self) -> Result<PartitionContents> {
        for (writer, path) in self.writers.iter_mut().zip(&self.paths) {
            writer.flush().map_err(|e| PartitionError::io(path, e))?;
        }
        Ok(self.contents)
    }
}

impl PartitionSink for FilePartitionSink {
    fn num_partitions(&self) -> usize {
        self.writers.len()
    }

    fn emit(&mut self, partition: PartitionId, edge: &Edge) -> Result<()> {
        self.contents.record(partition, edge)?;
        self.writers[partition]
            .write_record(edge.record())
            .map_err(|e| PartitionError::csv(&self.paths[partition], e))
    }

    fn contents(&self) -> &PartitionContents {
        &self.contents
    }
}

/// Keeps emitted edges in memory, in emission order
#[derive(Debug, Clone)]
pub struct MemoryPartitionSink {
    partitions: Vec<Vec<Edge>>,
    placements: Vec<PartitionId>,
    contents: PartitionContents,
}

impl MemoryPartitionSink {
    pub fn new(num_partitions: usize) -> Self {
        Self {
            partitions: vec![Vec::new(); num_partitions],
            placements: Vec::new(),
            contents: PartitionContents::new(num_partitions),
        }
    }

    pub fn partitions(&self) -> &[Vec<Edge>] {
        &self.partitions
    }

    /// Partition of every emitted edge, in emission order
    pub fn placements(&self) -> &[PartitionId] {
        &self.placements
    }

    /// Partition that received the `n`-th emitted edge
    pub fn partition_of_position(&self, n: usize) -> Option<PartitionId> {
        self.placements.get(n).copied()
    }
}

impl PartitionSink for MemoryPartitionSink {
    fn num_partitions(&self) -> usize {
        self.partitions.len()
    }

    fn emit(&mut self, partition: PartitionId, edge: &Edge) -> Result<()> {
        self.contents.record(partition, edge)?;
        self.partitions[partition].push(edge.clone());
        self.placements.push(partition);
        Ok(())
    }

    fn contents(&self) -> &PartitionContents {
        &self.contents
    }
}
