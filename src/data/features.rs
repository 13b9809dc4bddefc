//! Splitting the per-vertex feature file along the partitions

use crate::error::{PartitionError, Result};
use crate::graph::parse_vertex;
use crate::partition::OwnershipTable;
use crate::storage::PartitionContents;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Name of partition `i`'s feature file
pub fn features_file_name(partition: usize) -> String {
    format!("features_{}.txt", partition)
}

/// Copy each feature row `vertex_id,feature...` into `features_<i>.txt` for
/// every partition `i` whose edges mention the vertex or that owns it.
///
/// Returns the number of rows written per partition, or `None` when the
/// dataset has no feature file.
pub fn partition_features(
    features_path: &Path,
    output_dir: &Path,
    ownership: &OwnershipTable,
    contents: &PartitionContents,
) -> Result<Option<Vec<u64>>> {
    if !features_path.exists() {
        log::warn!(
            "Feature file {} not found, skipping feature partitioning",
            features_path.display()
        );
        return Ok(None);
    }

    log::info!("Partitioning features from {}", features_path.display());

    let file = File::open(features_path).map_err(|e| PartitionError::io(features_path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .flexible(true)
        .from_reader(BufReader::new(file));

    let num_partitions = contents.num_partitions();
    let paths: Vec<PathBuf> = (0..num_partitions)
        .map(|p| output_dir.join(features_file_name(p)))
        .collect();
    let mut writers = paths
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

    let mut rows_written = vec![0u64; num_partitions];
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| PartitionError::csv(features_path, e))?;
        let line = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or(index as u64 + 1);
        let field = record.get(0).ok_or_else(|| {
            PartitionError::data_format(features_path, line, "empty feature row")
        })?;
        let vertex = parse_vertex(field, features_path, line)?;
        let owner = ownership.owner_of(vertex);

        for partition in 0..num_partitions {
            if owner == Some(partition) || contents.vertices[partition].contains(&vertex) {
                writers[partition]
                    .write_record(&record)
                    .map_err(|e| PartitionError::csv(&paths[partition], e))?;
                rows_written[partition] += 1;
            }
        }
    }

    for (writer, path) in writers.iter_mut().zip(&paths) {
        writer.flush().map_err(|e| PartitionError::io(path, e))?;
    }

    log::info!("Feature rows per partition: {:?}", rows_written);
    Ok(Some(rows_written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;
    use crate::storage::{MemoryPartitionSink, PartitionSink};
    use std::fs;

    #[test]
    fn test_rows_follow_partition_vertices() {
        let dir = tempfile::tempdir().unwrap();
        let features = dir.path().join("features.csv");
        fs::write(&features, "0,0.1,0.2\n1,0.3,0.4\n2,0.5,0.6\n9,1.0,1.0\n").unwrap();

        let mut sink = MemoryPartitionSink::new(2);
        sink.emit(0, &Edge::new(0, 1)).unwrap();
        sink.emit(1, &Edge::new(1, 2)).unwrap();
        let mut ownership = OwnershipTable::new();
        ownership.assign(1, 0);
        ownership.assign(2, 1);
        ownership.assign(9, 1);

        let rows = partition_features(&features, dir.path(), &ownership, sink.contents())
            .unwrap()
            .unwrap();
        assert_eq!(rows, vec![2, 3]);
        assert_eq!(
            fs::read_to_string(dir.path().join("features_0.txt")).unwrap(),
            "0 0.1 0.2\n1 0.3 0.4\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("features_1.txt")).unwrap(),
            "1 0.3 0.4\n2 0.5 0.6\n9 1.0 1.0\n"
        );
    }

    #[test]
    fn test_missing_feature_file_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let sink = MemoryPartitionSink::new(2);
        let result = partition_features(
            &dir.path().join("features.csv"),
            dir.path(),
            &OwnershipTable::new(),
            sink.contents(),
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_bad_feature_id() {
        let dir = tempfile::tempdir().unwrap();
        let features = dir.path().join("features.csv");
        fs::write(&features, "0,0.1\nnode,0.2\n").unwrap();
        let sink = MemoryPartitionSink::new(1);
        let err = partition_features(&features, dir.path(), &OwnershipTable::new(), sink.contents())
            .unwrap_err();
        assert!(matches!(err, PartitionError::DataFormat { line: 2, .. }));
    }
}
