//! Edge records, replayable edge streams and graph indexes

pub mod algorithms;
pub mod builder;
pub mod compressed;
pub mod stream;

pub use builder::{ReverseIndexBuilder, VertexIndex};
pub use compressed::ReverseIndex;
pub use stream::{CsvEdgeStream, EdgeIter, EdgeStream, MemoryEdgeStream};

use crate::error::{PartitionError, Result};
use csv::StringRecord;
use std::path::Path;

/// Vertex identifier as it appears in the edge list
pub type VertexId = u64;

/// A directed edge `src -> dst` plus the raw record it was read from.
///
/// The record keeps every column verbatim so trailing feature/label columns
/// survive being copied into a partition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub src: VertexId,
    pub dst: VertexId,
    record: StringRecord,
}

impl Edge {
    pub fn new(src: VertexId, dst: VertexId) -> Self {
        Self::with_columns(src, dst, &[])
    }

    /// Build an edge carrying extra passthrough columns
    pub fn with_columns(src: VertexId, dst: VertexId, extra: &[&str]) -> Self {
        let mut record = StringRecord::new();
        record.push_field(&src.to_string());
        record.push_field(&dst.to_string());
        for column in extra {
            record.push_field(column);
        }
        Self { src, dst, record }
    }

    /// Parse the first two columns of a record as `(source_id, destination_id)`
    pub fn from_record(record: StringRecord, path: &Path, line: u64) -> Result<Self> {
        if record.len() < 2 {
            return Err(PartitionError::data_format(
                path,
                line,
                format!("expected at least 2 columns, found {}", record.len()),
            ));
        }
        let src = parse_vertex(&record[0], path, line)?;
        let dst = parse_vertex(&record[1], path, line)?;
        Ok(Self { src, dst, record })
    }

    /// All columns of the edge, including passthrough payload
    pub fn record(&self) -> &StringRecord {
        &self.record
    }

    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.src, self.dst)
    }
}

/// Parse a vertex id column, reporting the offending line on failure
pub fn parse_vertex(field: &str, path: &Path, line: u64) -> Result<VertexId> {
    field.trim().parse::<VertexId>().map_err(|_| {
        PartitionError::data_format(path, line, format!("'{}' is not a vertex id", field))
    })
}
