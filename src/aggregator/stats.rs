//! Counters describing one aggregation run.
//!
//! Recoverable problems (truncated files, unreadable paths, records of a
//! family the mode ignores) never stop a run; they are counted here and
//! reported once at the end.

/// Run statistics
///
/// **Public** - returned from the aggregate command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Files that yielded records or ended cleanly, including files cut
    /// short by a truncated record or a read error after their first record
    pub files_processed: u64,

    /// Paths that could not be opened, listed, or read before their first record
    pub files_skipped: u64,

    /// Files that ended in the middle of a record
    pub truncated_files: u64,

    /// Complete records decoded
    pub records_decoded: u64,

    /// Records merged into the table
    pub records_aggregated: u64,

    /// Records that produced no key for the active mode
    pub records_skipped: u64,

    /// Distinct aggregation keys
    pub unique_keys: u64,
}

impl RunStats {
    /// Whether any input was lost to truncation or read errors
    pub fn has_input_problems(&self) -> bool {
        self.truncated_files > 0 || self.files_skipped > 0
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and the `--summary` flag
    pub fn summary(&self) -> String {
        format!(
            "Files: {} (skipped {}, truncated {}) | Records: {} decoded, {} aggregated, {} skipped | Keys: {}",
            self.files_processed,
            self.files_skipped,
            self.truncated_files,
            self.records_decoded,
            self.records_aggregated,
            self.records_skipped,
            self.unique_keys
        )
    }
}
