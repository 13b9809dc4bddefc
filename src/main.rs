use anyhow::Result;
use clap::{Parser, ValueEnum};
use edge_stream_partitioner::{
    ExpansionMode, OwnershipFormat, PartitionConfig, Partitioner, StreamPartitioner,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    /// Randomized baseline
    #[value(alias = "hashing")]
    Random,
    /// High Degree Replicated First
    Hdrf,
}

#[derive(Parser, Debug)]
#[clap(
    name = "edge-stream-partitioner",
    about = "Streaming edge partitioning with K-hop neighborhood replication"
)]
struct Cli {
    /// Dataset name (a directory under --path holding edge_list.csv)
    #[clap(long)]
    dataset: String,

    /// Dataset root path
    #[clap(long, default_value = "datasets")]
    path: String,

    /// Output directory for partition files
    #[clap(long, default_value = "output")]
    output_path: String,

    /// Partitioning strategy
    #[clap(long, value_enum, default_value = "hdrf")]
    method: Method,

    /// Number of partitions
    #[clap(long, default_value = "4")]
    partitions: usize,

    /// Hops of in-neighborhood replicated into each partition
    #[clap(long, default_value = "1")]
    k: usize,

    /// Random seed
    #[clap(long, default_value = "42")]
    seed: u64,

    /// HDRF balance weight
    #[clap(long, default_value = "1.0")]
    lambda: f64,

    /// HDRF balance smoothing constant
    #[clap(long, default_value = "1.0")]
    epsilon: f64,

    /// How K > 1 replication walks the graph
    #[clap(long, value_enum, default_value = "streaming")]
    expansion: ExpansionMode,

    /// Encoding of the persisted ownership table
    #[clap(long, value_enum, default_value = "json")]
    ownership_format: OwnershipFormat,

    /// Do not split the dataset's feature file
    #[clap(long)]
    skip_features: bool,

    /// Do not write statistics.json
    #[clap(long)]
    skip_statistics: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

impl Cli {
    fn to_config(&self) -> PartitionConfig {
        PartitionConfig {
            k: self.k,
            seed: self.seed,
            lambda: self.lambda,
            epsilon: self.epsilon,
            partition_features_file: !self.skip_features,
            print_partition_statistics: !self.skip_statistics,
            expansion: self.expansion,
            ownership_format: self.ownership_format,
            ..PartitionConfig::new(&self.dataset, &self.path, &self.output_path, self.partitions)
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = args.to_config();
    config.validate()?;

    let partitioner: Box<dyn Partitioner> = match args.method {
        Method::Random => Box::new(StreamPartitioner::random(config)),
        Method::Hdrf => Box::new(StreamPartitioner::hdrf(config)),
    };

    let report = partitioner.partition()?;

    log::info!(
        "Placed {} edges over {} vertices; replication factor {:.3}",
        report.edge_count,
        report.node_count,
        report.replication_factor
    );

    Ok(())
}
