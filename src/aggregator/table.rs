//! Keyed accumulation of flow counters.
//!
//! Each key owns one entry holding the running packet and byte totals plus
//! the most recently merged record. Which record ends up as the
//! representative depends on input order and is never used for output;
//! report rows take their key from the table key.

use crate::parser::FlowRecord;
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Running totals for one aggregation key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccumulatorEntry {
    /// Latest record merged under this key
    pub representative: FlowRecord,
    pub packets: u64,
    pub bytes: u64,
}

/// Map from aggregation key to accumulated totals
#[derive(Debug, Default)]
pub struct AggregationTable {
    entries: HashMap<String, AccumulatorEntry>,
}

impl AggregationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `record` into the entry for `key`
    ///
    /// **Public** - the fold step of the aggregation pipeline
    ///
    /// Counters saturate at `u64::MAX` instead of wrapping.
    pub fn merge(&mut self, key: String, record: &FlowRecord) {
        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                entry.packets = entry.packets.saturating_add(record.packets);
                entry.bytes = entry.bytes.saturating_add(record.bytes);
                entry.representative = *record;
            }
            Entry::Vacant(vacant) => {
                debug!("New aggregation key: {}", vacant.key());
                vacant.insert(AccumulatorEntry {
                    representative: *record,
                    packets: record.packets,
                    bytes: record.bytes,
                });
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&AccumulatorEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the table, yielding entries in no particular order
    pub fn into_entries(self) -> impl Iterator<Item = (String, AccumulatorEntry)> {
        self.entries.into_iter()
    }
}
