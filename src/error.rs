//! Error types for the partitioning engine

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PartitionError>;

#[derive(Debug, Error)]
pub enum PartitionError {
    #[error("[ConfigError] {0}")]
    Config(String),

    #[error("[DataFormatError] {message} at line {line} of '{}'", .path.display())]
    DataFormat {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("[IOError] '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[IOError] '{}': {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("[SerdeError] Could not serialize '{what}': {message}")]
    Serialize { what: String, message: String },

    #[error("[ReplicationError] Vertex {vertex} has no owner; the edge stream changed between passes")]
    UnownedVertex { vertex: u64 },
}

impl PartitionError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PartitionError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        PartitionError::Csv {
            path: path.into(),
            source,
        }
    }

    pub fn data_format(path: impl Into<PathBuf>, line: u64, message: impl Into<String>) -> Self {
        PartitionError::DataFormat {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}
