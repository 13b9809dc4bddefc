use edge_stream_partitioner::config::{ExpansionMode, OwnershipFormat};
use edge_stream_partitioner::storage::load_ownership;
use edge_stream_partitioner::{PartitionConfig, PartitionError, Partitioner, StreamPartitioner};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const EDGES: &str = "\
0,1,0.1,a
2,1,0.2,b
1,3,0.3,c
4,3,0.4,d
3,5,0.5,e
5,0,0.6,f
6,2,0.7,g
2,6,0.8,h
";

fn setup(edges: &str) -> (TempDir, PartitionConfig) {
    let dir = tempfile::tempdir().unwrap();
    let dataset_dir = dir.path().join("datasets").join("toy");
    fs::create_dir_all(&dataset_dir).unwrap();
    fs::write(dataset_dir.join("edge_list.csv"), edges).unwrap();

    let config = PartitionConfig::new(
        "toy",
        dir.path().join("datasets"),
        dir.path().join("out"),
        2,
    );
    (dir, config)
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn partition_lines(config: &PartitionConfig) -> Vec<Vec<String>> {
    (0..config.number_partition)
        .map(|p| read_lines(&config.output_path.join(format!("partition_{}.txt", p))))
        .collect()
}

fn input_lines(edges: &str) -> Vec<String> {
    edges.lines().map(|line| line.replace(',', " ")).collect()
}

#[test]
fn test_base_pass_covers_input_exactly_once() {
    for num_partitions in 1..=4 {
        let (_dir, mut config) = setup(EDGES);
        config.number_partition = num_partitions;
        config.k = 0;

        let partitioners: Vec<Box<dyn Partitioner>> = vec![
            Box::new(StreamPartitioner::random(config.clone())),
            Box::new(StreamPartitioner::hdrf(config.clone())),
        ];
        for partitioner in partitioners {
            let report = partitioner.partition().unwrap();
            let files = partition_lines(&config);
            assert_eq!(files.len(), num_partitions);

            let mut written: Vec<String> = files.into_iter().flatten().collect();
            let mut expected = input_lines(EDGES);
            written.sort();
            expected.sort();
            assert_eq!(written, expected);
            assert_eq!(report.edge_count, 8);
            assert_eq!(report.base_edges.iter().sum::<u64>(), 8);
        }
    }
}

#[test]
fn test_hdrf_k1_colocates_in_edges_with_owner() {
    let (_dir, config) = setup(EDGES);
    let report = StreamPartitioner::hdrf(config.clone()).partition().unwrap();

    let ownership = load_ownership(&config.ownership_path(), OwnershipFormat::Json).unwrap();
    assert_eq!(ownership.len(), 6);
    assert_eq!(report.node_count, 6);

    let files = partition_lines(&config);
    for line in input_lines(EDGES) {
        let dst: u64 = line.split(' ').nth(1).unwrap().parse().unwrap();
        let owner = ownership.owner_of(dst).unwrap();
        assert!(files[owner].contains(&line), "{} missing from partition {}", line, owner);
    }

    // assignment pass plus one full re-materialization
    let total: usize = files.iter().map(Vec::len).sum();
    assert_eq!(total, 16);
    assert_eq!(report.replicated_edges, 8);
}

#[test]
fn test_streaming_and_indexed_expansion_agree() {
    for k in 2..=3 {
        let (_dir_a, mut streaming) = setup(EDGES);
        streaming.k = k;
        streaming.expansion = ExpansionMode::Streaming;
        let (_dir_b, mut indexed) = setup(EDGES);
        indexed.k = k;
        indexed.expansion = ExpansionMode::Indexed;

        let a = StreamPartitioner::hdrf(streaming.clone()).partition().unwrap();
        let b = StreamPartitioner::hdrf(indexed.clone()).partition().unwrap();

        assert_eq!(partition_lines(&streaming), partition_lines(&indexed));
        assert_eq!(a.hops, b.hops);
        assert_eq!(a.hops.len(), 2 * k);
    }
}

#[test]
fn test_empty_edge_list() {
    let (_dir, mut config) = setup("");
    config.number_partition = 3;
    config.k = 2;
    let report = StreamPartitioner::random(config.clone()).partition().unwrap();

    assert_eq!(report.edge_count, 0);
    assert_eq!(report.node_count, 0);
    for lines in partition_lines(&config) {
        assert!(lines.is_empty());
    }
    assert_eq!(fs::read_to_string(config.ownership_path()).unwrap(), "{}");
}

#[test]
fn test_zero_partitions_rejected_before_io() {
    let (_dir, mut config) = setup(EDGES);
    config.number_partition = 0;
    let err = StreamPartitioner::hdrf(config.clone()).partition().unwrap_err();
    assert!(matches!(err, PartitionError::Config(_)));
    assert!(!config.output_path.exists());
}

#[test]
fn test_malformed_record_fails() {
    let (_dir, config) = setup("0,1\n1\n");
    let err = StreamPartitioner::hdrf(config).partition().unwrap_err();
    match err {
        PartitionError::DataFormat { line, .. } => assert_eq!(line, 2),
        other => panic!("expected data format error, got {}", other),
    }
}

#[test]
fn test_missing_edge_list() {
    let (_dir, mut config) = setup(EDGES);
    config.dataset = "missing".to_string();
    let err = StreamPartitioner::random(config).partition().unwrap_err();
    assert!(matches!(err, PartitionError::Io { .. }));
}

#[test]
fn test_statistics_and_features_written() {
    let (dir, config) = setup(EDGES);
    fs::write(
        dir.path().join("datasets/toy/features.csv"),
        "0,1.0\n1,1.1\n2,1.2\n3,1.3\n4,1.4\n5,1.5\n6,1.6\n",
    )
    .unwrap();

    let report = StreamPartitioner::hdrf(config.clone()).partition().unwrap();

    let stats: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config.statistics_path()).unwrap()).unwrap();
    assert_eq!(stats["edge_count"], 8);
    assert_eq!(stats["method"], "hdrf");
    assert!(report.replication_factor >= 1.0);

    // every vertex mentioned by a partition's edges has its feature row there
    for p in 0..config.number_partition {
        let features = read_lines(&config.output_path.join(format!("features_{}.txt", p)));
        let with_features: HashSet<&str> = features
            .iter()
            .map(|row| row.split(' ').next().unwrap())
            .collect();
        for line in &partition_lines(&config)[p] {
            for vertex in line.split(' ').take(2) {
                assert!(with_features.contains(vertex));
            }
        }
    }
}

#[test]
fn test_bincode_ownership() {
    let (_dir, mut config) = setup(EDGES);
    config.ownership_format = OwnershipFormat::Bincode;
    StreamPartitioner::random(config.clone()).partition().unwrap();

    assert!(config.output_path.join("partition.bin").exists());
    let ownership = load_ownership(&config.ownership_path(), OwnershipFormat::Bincode).unwrap();
    assert_eq!(ownership.len(), 6);
}
