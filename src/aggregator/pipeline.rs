//! Sequential decode → key → merge pipeline.
//!
//! An `Aggregator` is fed one byte stream per input file. Each stream is
//! decoded lazily; every record is keyed and merged into a single table.
//! Once all streams are consumed, `finish` ranks the table.

use super::key::AggregationConfig;
use super::ranker::{rank, RankedRow, SortMetric};
use super::stats::RunStats;
use super::table::AggregationTable;
use crate::parser::RecordReader;
use crate::utils::error::CodecError;
use log::debug;
use std::io::Read;

/// Stateful aggregation over any number of input streams
#[derive(Debug)]
pub struct Aggregator {
    config: AggregationConfig,
    table: AggregationTable,
    stats: RunStats,
}

impl Aggregator {
    pub fn new(config: AggregationConfig) -> Self {
        Self {
            config,
            table: AggregationTable::new(),
            stats: RunStats::default(),
        }
    }

    /// Decode and merge every record from `reader`
    ///
    /// **Public** - called once per input file
    ///
    /// Records decoded before an error stay merged. The stream is
    /// abandoned at the first error.
    ///
    /// # Returns
    /// Number of complete records read from this stream
    ///
    /// # Errors
    /// * `CodecError::TruncatedRecord` - stream ended inside a record
    /// * `CodecError::Io` - underlying read failed
    pub fn ingest<R: Read>(&mut self, source: &str, reader: R) -> Result<u64, CodecError> {
        let mut records = RecordReader::new(reader);
        let mut outcome = Ok(());

        for item in records.by_ref() {
            let record = match item {
                Ok(record) => record,
                Err(e) => {
                    outcome = Err(e);
                    break;
                }
            };
            self.stats.records_decoded += 1;

            match self.config.derive_key(&record) {
                Some(key) => {
                    self.table.merge(key, &record);
                    self.stats.records_aggregated += 1;
                }
                None => self.stats.records_skipped += 1,
            }
        }

        let count = records.records_read();
        match &outcome {
            Ok(()) => self.stats.files_processed += 1,
            Err(CodecError::TruncatedRecord { .. }) => {
                self.stats.files_processed += 1;
                self.stats.truncated_files += 1;
            }
            // A read failure after some records still counts as processed input
            Err(CodecError::Io(_)) if count > 0 => self.stats.files_processed += 1,
            Err(CodecError::Io(_)) => self.stats.files_skipped += 1,
        }

        debug!("{}: {} records", source, count);

        outcome.map(|()| count)
    }

    /// Count input paths that could not be opened or listed
    pub fn record_skipped_files(&mut self, count: u64) {
        self.stats.files_skipped += count;
    }

    /// Statistics so far
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Rank the accumulated table and return it with the final statistics
    pub fn finish(self, metric: SortMetric) -> (Vec<RankedRow>, RunStats) {
        let mut stats = self.stats;
        if self.table.is_empty() {
            debug!("No records were aggregated");
        }
        stats.unique_keys = self.table.len() as u64;
        (rank(self.table, metric), stats)
    }
}
