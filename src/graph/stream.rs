//! Replayable edge streams

use crate::error::{PartitionError, Result};
use crate::graph::{Edge, VertexId};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub type EdgeIter<'a> = Box<dyn Iterator<Item = Result<Edge>> + 'a>;

/// A pull-based edge stream that can be replayed from the start.
///
/// Every call to `scan()` begins a fresh pass over the same edges in the
/// same order. The engine replays the stream up to K+1 times per run.
pub trait EdgeStream {
    fn scan(&self) -> Result<EdgeIter<'_>>;

    /// Human readable source, used in log lines
    fn describe(&self) -> String;
}

/// Comma-delimited edge list on disk, one `source,destination[,extra...]` per line
pub struct CsvEdgeStream {
    path: PathBuf,
}

impl CsvEdgeStream {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EdgeStream for CsvEdgeStream {
    fn scan(&self) -> Result<EdgeIter<'_>> {
        let file = File::open(&self.path).map_err(|e| PartitionError::io(&self.path, e))?;
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b',')
            .flexible(true)
            .from_reader(BufReader::new(file));

        let path = self.path.as_path();
        let records = reader.into_records().enumerate().map(move |(index, record)| {
            let record = record.map_err(|e| PartitionError::csv(path, e))?;
            let line = record
                .position()
                .map(|pos| pos.line())
                .unwrap_or(index as u64 + 1);
            Edge::from_record(record, path, line)
        });
        Ok(Box::new(records))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory edge stream
#[derive(Debug, Clone, Default)]
pub struct MemoryEdgeStream {
    edges: Vec<Edge>,
}

impl MemoryEdgeStream {
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    pub fn from_pairs(pairs: &[(VertexId, VertexId)]) -> Self {
        Self::new(pairs.iter().map(|&(src, dst)| Edge::new(src, dst)).collect())
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl EdgeStream for MemoryEdgeStream {
    fn scan(&self) -> Result<EdgeIter<'_>> {
        Ok(Box::new(self.edges.iter().cloned().map(Ok)))
    }

    fn describe(&self) -> String {
        format!("<memory: {} edges>", self.edges.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_edge_list(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_scan_is_replayable() {
        let file = write_edge_list("0,1\n2,1\n1,3\n");
        let stream = CsvEdgeStream::new(file.path());

        let first: Vec<(u64, u64)> = stream.scan().unwrap().map(|e| e.unwrap().endpoints()).collect();
        let second: Vec<(u64, u64)> = stream.scan().unwrap().map(|e| e.unwrap().endpoints()).collect();
        assert_eq!(first, vec![(0, 1), (2, 1), (1, 3)]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_extra_columns_preserved() {
        let file = write_edge_list("4,5,0.25,train\n");
        let stream = CsvEdgeStream::new(file.path());
        let edge = stream.scan().unwrap().next().unwrap().unwrap();
        let columns: Vec<&str> = edge.record().iter().collect();
        assert_eq!(columns, vec!["4", "5", "0.25", "train"]);
    }

    #[test]
    fn test_malformed_line_reported() {
        let file = write_edge_list("0,1\n2,abc\n");
        let stream = CsvEdgeStream::new(file.path());
        let results: Vec<Result<Edge>> = stream.scan().unwrap().collect();
        assert!(results[0].is_ok());
        match &results[1] {
            Err(PartitionError::DataFormat { line, .. }) => assert_eq!(*line, 2),
            other => panic!("expected data format error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let stream = CsvEdgeStream::new("/nonexistent/edge_list.csv");
        assert!(matches!(stream.scan(), Err(PartitionError::Io { .. })));
    }

    #[test]
    fn test_empty_memory_stream() {
        let stream = MemoryEdgeStream::default();
        assert!(stream.is_empty());
        assert_eq!(stream.scan().unwrap().count(), 0);
    }
}
