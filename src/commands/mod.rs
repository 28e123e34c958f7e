//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod aggregate;
pub mod models;

// Re-export main command functions
pub use aggregate::{
    aggregate_directory, emit_report, execute_aggregate, resolve_config, run_aggregation,
    validate_args, RunConfig,
};
pub use models::{AggregateArgs, OutputFormat};
