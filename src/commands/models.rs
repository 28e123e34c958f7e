use clap::ValueEnum;
use std::path::PathBuf;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `#key,packets,bytes` header followed by one line per key
    #[default]
    Csv,
    /// Pretty-printed JSON document
    Json,
}

/// Arguments for the aggregate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AggregateArgs {
    /// Directory walked recursively for record files
    pub input_dir: PathBuf,

    /// Aggregation mode text, e.g. "dstport" or "srcip4/24"
    pub aggregation: String,

    /// Sort metric text: "packets" or "bytes"
    pub sort: String,

    /// Report destination (None = stdout)
    pub output: Option<PathBuf>,

    /// Report format
    pub format: OutputFormat,

    /// Print run statistics to stderr
    pub print_summary: bool,
}

impl Default for AggregateArgs {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::new(),
            aggregation: "srcport".to_string(),
            sort: "packets".to_string(),
            output: None,
            format: OutputFormat::Csv,
            print_summary: false,
        }
    }
}
