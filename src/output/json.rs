//! JSON report writer.
//!
//! Carries the same rows as the CSV report plus the key name, the sort
//! metric and a generation timestamp.

use crate::aggregator::RankedRow;
use crate::utils::error::OutputError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Top-level JSON report structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Header name of the key column (e.g. "dstport")
    pub key_name: String,

    /// Metric the rows are sorted by
    pub sort: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Rows, highest metric first
    pub rows: Vec<RankedRow>,
}

impl Report {
    pub fn new(key_name: &str, sort: &str, rows: Vec<RankedRow>) -> Self {
        use chrono::Utc;

        Self {
            key_name: key_name.to_string(),
            sort: sort.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            rows,
        }
    }
}

/// Write a report as pretty-printed JSON
pub fn write_json<W: Write>(mut writer: W, report: &Report) -> Result<(), OutputError> {
    debug!("Serializing {} rows as JSON", report.rows.len());

    serde_json::to_writer_pretty(&mut writer, report).map_err(OutputError::SerializationFailed)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
