//! Flow Aggregator CLI
//!
//! Aggregates a directory of binary flow records by port or masked address
//! and prints the totals ranked by packet or byte volume.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use flow_aggregator::commands::{execute_aggregate, validate_args, AggregateArgs, OutputFormat};

/// Flow Aggregator - rank flow records by traffic volume
#[derive(Parser, Debug)]
#[command(name = "flow")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory of flow record files (walked recursively)
    #[arg(short = 'f', long = "dir", env = "FLOW_DIR")]
    dir: PathBuf,

    /// Aggregation: srcport, dstport, srcip, dstip, or srcip4/dstip4/srcip6/dstip6 with optional /<prefix>
    #[arg(short, long)]
    aggregation: String,

    /// Sort metric: packets or bytes
    #[arg(short, long)]
    sort: String,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Print run statistics to stderr
    #[arg(long)]
    summary: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = AggregateArgs {
        input_dir: cli.dir,
        aggregation: cli.aggregation,
        sort: cli.sort,
        output: cli.output,
        format: cli.format,
        print_summary: cli.summary,
    };

    // Validate args first
    validate_args(&args)?;

    execute_aggregate(args)?;

    Ok(())
}
