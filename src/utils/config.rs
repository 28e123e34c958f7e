//! Configuration and constants for the CLI.

/// Size of one flow record on disk:
/// family (4) + two addresses (16 + 16) + two ports (2 + 2) + packets (8) + bytes (8)
pub const RECORD_SIZE: usize = 56;

// Byte offsets of each field inside a record
pub const FAMILY_OFFSET: usize = 0;
pub const SOURCE_ADDRESS_OFFSET: usize = 4;
pub const DEST_ADDRESS_OFFSET: usize = 20;
pub const SOURCE_PORT_OFFSET: usize = 36;
pub const DEST_PORT_OFFSET: usize = 38;
pub const PACKETS_OFFSET: usize = 40;
pub const BYTES_OFFSET: usize = 48;

// Address family tags as written by the collector (Linux AF_INET / AF_INET6)
pub const FAMILY_TAG_IPV4: u32 = 2;
pub const FAMILY_TAG_IPV6: u32 = 10;

// Prefix lengths: maximum is also the default (no masking)
pub const IPV4_MAX_PREFIX: u8 = 32;
pub const IPV6_MAX_PREFIX: u8 = 128;
