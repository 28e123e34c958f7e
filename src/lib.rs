//! Flow Aggregator
//!
//! Decodes fixed-layout binary flow records, groups them by port or by
//! masked IPv4/IPv6 address, and ranks the groups by packet or byte volume.
//!
//! This crate provides the core implementation for the `flow` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! flow -f /var/flows -a srcip4/24 -s bytes
//! ```

pub mod aggregator;
pub mod commands;
pub mod input;
pub mod output;
pub mod parser;
pub mod utils;
