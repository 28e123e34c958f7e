//! Fixed-layout flow record decoding.
//!
//! Every multi-byte numeric field is stored in network byte order on disk.
//! Addresses are kept as raw 16-byte storage; an IPv4 address occupies the
//! last 4 bytes of its slot.

use crate::utils::config::{
    BYTES_OFFSET, DEST_ADDRESS_OFFSET, DEST_PORT_OFFSET, FAMILY_OFFSET, FAMILY_TAG_IPV4,
    FAMILY_TAG_IPV6, PACKETS_OFFSET, RECORD_SIZE, SOURCE_ADDRESS_OFFSET, SOURCE_PORT_OFFSET,
};
use crate::utils::error::CodecError;
use byteorder::{BigEndian, ByteOrder};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Address family carried by a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
    /// Tag matched neither known family; the raw tag is kept for diagnostics
    Unrecognized(u32),
}

impl AddressFamily {
    /// Map a host-order family tag to a family
    pub fn from_tag(tag: u32) -> Self {
        match tag {
            FAMILY_TAG_IPV4 => AddressFamily::Ipv4,
            FAMILY_TAG_IPV6 => AddressFamily::Ipv6,
            other => AddressFamily::Unrecognized(other),
        }
    }

    /// Host-order tag for this family
    pub fn tag(self) -> u32 {
        match self {
            AddressFamily::Ipv4 => FAMILY_TAG_IPV4,
            AddressFamily::Ipv6 => FAMILY_TAG_IPV6,
            AddressFamily::Unrecognized(tag) => tag,
        }
    }
}

/// A single decoded flow record
///
/// All numeric fields are in host byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowRecord {
    pub family: AddressFamily,
    pub source_address: [u8; 16],
    pub dest_address: [u8; 16],
    pub source_port: u16,
    pub dest_port: u16,
    pub packets: u64,
    pub bytes: u64,
}

impl FlowRecord {
    /// Decode one record from the start of `buf`
    ///
    /// **Public** - main entry point of the codec
    ///
    /// # Errors
    /// * `CodecError::TruncatedRecord` - fewer than `RECORD_SIZE` bytes available
    pub fn decode(buf: &[u8]) -> Result<Self, CodecError> {
        if buf.len() < RECORD_SIZE {
            return Err(CodecError::TruncatedRecord {
                expected: RECORD_SIZE,
                remaining: buf.len(),
            });
        }

        let family = AddressFamily::from_tag(BigEndian::read_u32(&buf[FAMILY_OFFSET..]));

        let mut source_address = [0u8; 16];
        source_address.copy_from_slice(&buf[SOURCE_ADDRESS_OFFSET..SOURCE_ADDRESS_OFFSET + 16]);
        let mut dest_address = [0u8; 16];
        dest_address.copy_from_slice(&buf[DEST_ADDRESS_OFFSET..DEST_ADDRESS_OFFSET + 16]);

        Ok(Self {
            family,
            source_address,
            dest_address,
            source_port: BigEndian::read_u16(&buf[SOURCE_PORT_OFFSET..]),
            dest_port: BigEndian::read_u16(&buf[DEST_PORT_OFFSET..]),
            packets: BigEndian::read_u64(&buf[PACKETS_OFFSET..]),
            bytes: BigEndian::read_u64(&buf[BYTES_OFFSET..]),
        })
    }

    /// Encode this record into its on-disk layout
    ///
    /// Used to produce fixture files; the aggregation path never writes records.
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];
        BigEndian::write_u32(&mut buf[FAMILY_OFFSET..], self.family.tag());
        buf[SOURCE_ADDRESS_OFFSET..SOURCE_ADDRESS_OFFSET + 16]
            .copy_from_slice(&self.source_address);
        buf[DEST_ADDRESS_OFFSET..DEST_ADDRESS_OFFSET + 16].copy_from_slice(&self.dest_address);
        BigEndian::write_u16(&mut buf[SOURCE_PORT_OFFSET..], self.source_port);
        BigEndian::write_u16(&mut buf[DEST_PORT_OFFSET..], self.dest_port);
        BigEndian::write_u64(&mut buf[PACKETS_OFFSET..], self.packets);
        BigEndian::write_u64(&mut buf[BYTES_OFFSET..], self.bytes);
        buf
    }

    /// Create an IPv4 record with zero ports and counters
    pub fn ipv4(source: Ipv4Addr, dest: Ipv4Addr) -> Self {
        Self {
            family: AddressFamily::Ipv4,
            source_address: embed_ipv4(source),
            dest_address: embed_ipv4(dest),
            source_port: 0,
            dest_port: 0,
            packets: 0,
            bytes: 0,
        }
    }

    /// Create an IPv6 record with zero ports and counters
    pub fn ipv6(source: Ipv6Addr, dest: Ipv6Addr) -> Self {
        Self {
            family: AddressFamily::Ipv6,
            source_address: source.octets(),
            dest_address: dest.octets(),
            source_port: 0,
            dest_port: 0,
            packets: 0,
            bytes: 0,
        }
    }

    pub fn with_family(mut self, family: AddressFamily) -> Self {
        self.family = family;
        self
    }

    pub fn with_ports(mut self, source_port: u16, dest_port: u16) -> Self {
        self.source_port = source_port;
        self.dest_port = dest_port;
        self
    }

    pub fn with_counters(mut self, packets: u64, bytes: u64) -> Self {
        self.packets = packets;
        self.bytes = bytes;
        self
    }
}

/// Place an IPv4 address in the last 4 bytes of 16-byte address storage
pub fn embed_ipv4(addr: Ipv4Addr) -> [u8; 16] {
    let mut storage = [0u8; 16];
    storage[12..].copy_from_slice(&addr.octets());
    storage
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bytes() -> Vec<u8> {
        let mut buf = Vec::with_capacity(RECORD_SIZE);
        buf.extend_from_slice(&[0, 0, 0, 2]); // AF_INET
        buf.extend_from_slice(&[0; 12]);
        buf.extend_from_slice(&[192, 168, 1, 10]);
        buf.extend_from_slice(&[0; 12]);
        buf.extend_from_slice(&[10, 0, 0, 1]);
        buf.extend_from_slice(&[0x01, 0xBB]); // 443
        buf.extend_from_slice(&[0x00, 0x50]); // 80
        buf.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0x01, 0x00]); // 256
        buf.extend_from_slice(&[0, 0, 0, 0, 0, 0x01, 0x00, 0x00]); // 65536
        buf
    }

    #[test]
    fn test_decode_converts_network_order() {
        let record = FlowRecord::decode(&sample_bytes()).unwrap();

        assert_eq!(record.family, AddressFamily::Ipv4);
        assert_eq!(record.source_port, 443);
        assert_eq!(record.dest_port, 80);
        assert_eq!(record.packets, 256);
        assert_eq!(record.bytes, 65536);
        assert_eq!(&record.source_address[12..], &[192, 168, 1, 10]);
        assert_eq!(&record.dest_address[12..], &[10, 0, 0, 1]);
    }

    #[test]
    fn test_decode_ipv6_family() {
        let mut bytes = sample_bytes();
        bytes[3] = 10;
        let record = FlowRecord::decode(&bytes).unwrap();
        assert_eq!(record.family, AddressFamily::Ipv6);
    }

    #[test]
    fn test_decode_unrecognized_family() {
        let mut bytes = sample_bytes();
        bytes[0..4].copy_from_slice(&[0, 0, 0, 7]);
        let record = FlowRecord::decode(&bytes).unwrap();
        assert_eq!(record.family, AddressFamily::Unrecognized(7));
    }

    #[test]
    fn test_decode_little_endian_tag_is_unrecognized() {
        // A host-order tag written on a little-endian machine must not match
        let mut bytes = sample_bytes();
        bytes[0..4].copy_from_slice(&[2, 0, 0, 0]);
        let record = FlowRecord::decode(&bytes).unwrap();
        assert_eq!(record.family, AddressFamily::Unrecognized(0x0200_0000));
    }

    #[test]
    fn test_decode_short_buffer() {
        let bytes = sample_bytes();
        let err = FlowRecord::decode(&bytes[..RECORD_SIZE - 1]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::TruncatedRecord {
                expected: RECORD_SIZE,
                remaining: 55
            }
        ));
    }

    #[test]
    fn test_encode_matches_wire_layout() {
        let record = FlowRecord::ipv4(Ipv4Addr::new(192, 168, 1, 10), Ipv4Addr::new(10, 0, 0, 1))
            .with_ports(443, 80)
            .with_counters(256, 65536);

        assert_eq!(record.encode().to_vec(), sample_bytes());
    }
}
