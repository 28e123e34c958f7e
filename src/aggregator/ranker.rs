//! Rank aggregated entries by traffic volume.
//!
//! Rows are ordered by the chosen metric, highest first. Rows with equal
//! metric values are ordered by ascending key (byte-wise string order) so
//! the output is reproducible across runs.

use super::table::AggregationTable;
use crate::utils::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Volume metric used for ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMetric {
    Packets,
    Bytes,
}

impl SortMetric {
    pub fn name(&self) -> &'static str {
        match self {
            SortMetric::Packets => "packets",
            SortMetric::Bytes => "bytes",
        }
    }
}

impl FromStr for SortMetric {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "packets" => Ok(SortMetric::Packets),
            "bytes" => Ok(SortMetric::Bytes),
            other => Err(ConfigError::UnknownSortMetric(other.to_string())),
        }
    }
}

impl fmt::Display for SortMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One output row: aggregation key and its totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRow {
    pub key: String,
    pub packets: u64,
    pub bytes: u64,
}

impl RankedRow {
    pub fn new(key: impl Into<String>, packets: u64, bytes: u64) -> Self {
        Self {
            key: key.into(),
            packets,
            bytes,
        }
    }

    /// Value of `metric` for this row
    pub fn metric(&self, metric: SortMetric) -> u64 {
        match metric {
            SortMetric::Packets => self.packets,
            SortMetric::Bytes => self.bytes,
        }
    }
}

/// Order the table by `metric`, descending
///
/// **Public** - final stage before output
///
/// # Returns
/// Every entry of the table, highest metric first, ties by ascending key
pub fn rank(table: AggregationTable, metric: SortMetric) -> Vec<RankedRow> {
    let mut rows: Vec<RankedRow> = table
        .into_entries()
        .map(|(key, entry)| RankedRow::new(key, entry.packets, entry.bytes))
        .collect();

    rows.sort_by(|a, b| {
        b.metric(metric)
            .cmp(&a.metric(metric))
            .then_with(|| a.key.cmp(&b.key))
    });

    debug!("Ranked {} rows by {}", rows.len(), metric);

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::FlowRecord;
    use std::net::Ipv4Addr;

    fn table_of(entries: &[(&str, u64, u64)]) -> AggregationTable {
        let mut table = AggregationTable::new();
        for (key, packets, bytes) in entries {
            let record = FlowRecord::ipv4(Ipv4Addr::LOCALHOST, Ipv4Addr::LOCALHOST)
                .with_counters(*packets, *bytes);
            table.merge(key.to_string(), &record);
        }
        table
    }

    #[test]
    fn test_rank_by_packets() {
        let table = table_of(&[("22", 5, 9000), ("80", 50, 100), ("443", 20, 5000)]);
        let rows = rank(table, SortMetric::Packets);

        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["80", "443", "22"]);
    }

    #[test]
    fn test_rank_by_bytes() {
        let table = table_of(&[("22", 5, 9000), ("80", 50, 100), ("443", 20, 5000)]);
        let rows = rank(table, SortMetric::Bytes);

        assert_eq!(rows[0], RankedRow::new("22", 5, 9000));
        assert_eq!(rows[2], RankedRow::new("80", 50, 100));
    }

    #[test]
    fn test_ties_ordered_by_key() {
        let table = table_of(&[("b", 7, 1), ("c", 7, 2), ("a", 7, 3), ("z", 9, 0)]);
        let rows = rank(table, SortMetric::Packets);

        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["z", "a", "b", "c"]);
    }

    #[test]
    fn test_rank_empty_table() {
        assert!(rank(AggregationTable::new(), SortMetric::Bytes).is_empty());
    }

    #[test]
    fn test_parse_sort_metric() {
        assert_eq!("packets".parse::<SortMetric>().unwrap(), SortMetric::Packets);
        assert_eq!("bytes".parse::<SortMetric>().unwrap(), SortMetric::Bytes);
        assert_eq!(
            "flows".parse::<SortMetric>().unwrap_err(),
            ConfigError::UnknownSortMetric("flows".to_string())
        );
        assert!("Bytes".parse::<SortMetric>().is_err());
    }
}
