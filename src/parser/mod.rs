//! Flow record decoding.
//!
//! This module handles:
//! - Decoding the fixed binary record layout
//! - Normalizing network byte order to host order
//! - Streaming records lazily out of any reader

pub mod reader;
pub mod record;

// Re-export main types
pub use reader::RecordReader;
pub use record::{embed_ipv4, AddressFamily, FlowRecord};
