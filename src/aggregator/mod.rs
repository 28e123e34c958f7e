//! Aggregation of flow records into ranked totals.
//!
//! This module transforms decoded flow records into:
//! - Grouping keys (ports or masked addresses)
//! - Per-key packet and byte totals
//! - Rows ranked by packet or byte volume

pub mod key;
pub mod mask;
pub mod pipeline;
pub mod ranker;
pub mod stats;
pub mod table;

// Re-export main types and functions
pub use key::{AggregationConfig, AggregationMode};
pub use mask::{mask_address, mask_ipv4, mask_ipv6, MaskConfig};
pub use pipeline::Aggregator;
pub use ranker::{rank, RankedRow, SortMetric};
pub use stats::RunStats;
pub use table::{AccumulatorEntry, AggregationTable};
