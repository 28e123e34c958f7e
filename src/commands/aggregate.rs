//! Aggregate command implementation.
//!
//! The aggregate command:
//! 1. Resolves the aggregation mode and sort metric
//! 2. Walks the input directory
//! 3. Decodes and merges every record file
//! 4. Ranks the totals
//! 5. Writes the report

use super::models::{AggregateArgs, OutputFormat};
use crate::aggregator::{AggregationConfig, Aggregator, RankedRow, RunStats, SortMetric};
use crate::input::walk_input;
use crate::output::{open_output, validate_path, write_csv, write_json, Report};
use crate::utils::error::{ConfigError, InputError, OutputError};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use std::time::Instant;

/// Fully parsed run configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub aggregation: AggregationConfig,
    pub metric: SortMetric,
}

/// Parse the textual arguments into a run configuration
///
/// **Public** - all configuration errors surface here, before any input is read
pub fn resolve_config(args: &AggregateArgs) -> Result<RunConfig, ConfigError> {
    if args.input_dir.as_os_str().is_empty() {
        return Err(ConfigError::MissingInput);
    }

    Ok(RunConfig {
        aggregation: args.aggregation.parse()?,
        metric: args.sort.parse()?,
    })
}

/// Validate aggregate arguments
///
/// **Public** - can be called before execute_aggregate for early validation
pub fn validate_args(args: &AggregateArgs) -> Result<()> {
    resolve_config(args).context("Invalid configuration")?;

    if let Some(output) = &args.output {
        validate_path(output).context("Invalid output path")?;
    }

    Ok(())
}

/// Execute the aggregate command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Invalid aggregation mode, sort metric or prefix
/// * Missing or unreadable input directory
/// * Report write errors
///
/// Truncated or unreadable files are logged and counted, not returned.
pub fn execute_aggregate(args: AggregateArgs) -> Result<RunStats> {
    let start_time = Instant::now();
    let config = resolve_config(&args).context("Invalid configuration")?;

    let (rows, stats) = aggregate_directory(&args.input_dir, &config)?;

    let writer = open_output(args.output.as_deref()).context("Failed to open report output")?;
    emit_report(writer, &config, rows, args.format).context("Failed to write report")?;

    if let Some(path) = &args.output {
        info!("✓ Report written to: {}", path.display());
    }

    if args.print_summary {
        print_summary(&args, &config, &stats);
    }

    info!("Aggregation completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(stats)
}

/// Run the whole pipeline, writing the report to `writer`
///
/// **Public** - same as execute_aggregate without output file handling
pub fn run_aggregation<W: Write>(args: &AggregateArgs, writer: W) -> Result<RunStats> {
    let config = resolve_config(args).context("Invalid configuration")?;
    let (rows, stats) = aggregate_directory(&args.input_dir, &config)?;
    emit_report(writer, &config, rows, args.format).context("Failed to write report")?;
    Ok(stats)
}

/// Walk `root` and aggregate every file below it
///
/// # Errors
/// Only a missing or unreadable `root`; problems with individual files
/// are logged and counted in the returned statistics.
pub fn aggregate_directory(root: &Path, config: &RunConfig) -> Result<(Vec<RankedRow>, RunStats)> {
    info!(
        "Aggregating {} by {} (sort: {})",
        root.display(),
        config.aggregation.mode,
        config.metric
    );

    let mut walker = walk_input(root).context("Cannot read input directory")?;
    let mut aggregator = Aggregator::new(config.aggregation);

    for path in walker.by_ref() {
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(source) => {
                warn!("Skipping: {}", InputError::UnreadableFile { path, source });
                aggregator.record_skipped_files(1);
                continue;
            }
        };

        debug!("Processing {}", path.display());
        let source = path.display().to_string();

        // Records before the failure are already merged
        if let Err(e) = aggregator.ingest(&source, BufReader::new(file)) {
            warn!("{}: {}, ignoring rest of file", source, e);
        }
    }
    aggregator.record_skipped_files(walker.skipped());

    let (rows, stats) = aggregator.finish(config.metric);
    log_stats(&stats);

    Ok((rows, stats))
}

/// Write ranked rows in the requested format
pub fn emit_report<W: Write>(
    writer: W,
    config: &RunConfig,
    rows: Vec<RankedRow>,
    format: OutputFormat,
) -> Result<(), OutputError> {
    let key_name = config.aggregation.mode.key_name();

    match format {
        OutputFormat::Csv => write_csv(writer, key_name, &rows),
        OutputFormat::Json => {
            let report = Report::new(key_name, config.metric.name(), rows);
            write_json(writer, &report)
        }
    }
}

/// Log end-of-run statistics
///
/// **Private** - internal helper for aggregate_directory
fn log_stats(stats: &RunStats) {
    info!("Aggregation: {}", stats.summary());

    if !stats.has_input_problems() {
        return;
    }
    if stats.truncated_files > 0 {
        warn!(
            "{} file(s) ended with a truncated record",
            stats.truncated_files
        );
    }
    if stats.files_skipped > 0 {
        warn!("{} path(s) could not be read", stats.files_skipped);
    }
}

/// Print run statistics to stderr
///
/// **Private** - internal helper for execute_aggregate
fn print_summary(args: &AggregateArgs, config: &RunConfig, stats: &RunStats) {
    eprintln!("\n{}", "=".repeat(80));
    eprintln!("AGGREGATION SUMMARY");
    eprintln!("{}", "=".repeat(80));
    eprintln!("Input:        {}", args.input_dir.display());
    eprintln!("Aggregation:  {}", config.aggregation.mode);
    eprintln!("Sort:         {}", config.metric);
    eprintln!("Files:        {}", stats.files_processed);
    eprintln!("Skipped:      {}", stats.files_skipped);
    eprintln!("Truncated:    {}", stats.truncated_files);
    eprintln!("Records:      {}", stats.records_decoded);
    eprintln!("Aggregated:   {}", stats.records_aggregated);
    eprintln!("Keys:         {}", stats.unique_keys);
    eprintln!("{}", "=".repeat(80));
}
