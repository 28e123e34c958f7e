//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while decoding flow records
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Truncated record: expected {expected} bytes, only {remaining} remaining")]
    TruncatedRecord { expected: usize, remaining: usize },

    #[error("Failed to read record data: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors in the run configuration (aggregation mode, sort metric, prefixes)
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown aggregation mode: {0}")]
    UnknownAggregation(String),

    #[error("Unknown sort metric: {0} (expected 'packets' or 'bytes')")]
    UnknownSortMetric(String),

    #[error("Invalid prefix length: {0}")]
    InvalidPrefix(String),

    #[error("Prefix length {prefix} out of range for {family} (max {max})")]
    PrefixOutOfRange {
        family: &'static str,
        prefix: u8,
        max: u8,
    },

    #[error("Input directory path is empty")]
    MissingInput,
}

/// Errors that can occur while locating input files
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Input path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Cannot read directory {}: {source}", path.display())]
    UnreadableDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot open file {}: {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur during report output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write report: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
