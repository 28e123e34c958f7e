//! Lazy record stream over any byte source.
//!
//! A source is a concatenation of fixed-size records. Running out of bytes
//! exactly on a record boundary is a clean end; running out inside a record
//! yields one `TruncatedRecord` error and ends the stream.

use super::record::FlowRecord;
use crate::utils::config::RECORD_SIZE;
use crate::utils::error::CodecError;
use std::io::{ErrorKind, Read};
use std::iter::FusedIterator;

/// Iterator of decoded records read from `R`
pub struct RecordReader<R> {
    inner: R,
    buf: [u8; RECORD_SIZE],
    records_read: u64,
    done: bool,
}

impl<R: Read> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: [0u8; RECORD_SIZE],
            records_read: 0,
            done: false,
        }
    }

    /// Number of complete records decoded so far
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Fill the record buffer, tolerating short reads
    ///
    /// Returns the number of bytes placed in the buffer; less than
    /// `RECORD_SIZE` only at end of input.
    fn fill(&mut self) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < RECORD_SIZE {
            match self.inner.read(&mut self.buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<FlowRecord, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.fill() {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(n) if n < RECORD_SIZE => {
                self.done = true;
                Some(Err(CodecError::TruncatedRecord {
                    expected: RECORD_SIZE,
                    remaining: n,
                }))
            }
            Ok(_) => {
                self.records_read += 1;
                Some(FlowRecord::decode(&self.buf))
            }
            Err(e) => {
                self.done = true;
                Some(Err(CodecError::Io(e)))
            }
        }
    }
}

impl<R: Read> FusedIterator for RecordReader<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::net::Ipv4Addr;

    fn record(dest_port: u16) -> FlowRecord {
        FlowRecord::ipv4(Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 2))
            .with_ports(1234, dest_port)
            .with_counters(1, 100)
    }

    /// Reader that hands out at most `chunk` bytes per call
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        chunk: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.chunk.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    #[test]
    fn test_empty_source_is_clean_end() {
        let mut reader = RecordReader::new(Cursor::new(Vec::new()));
        assert!(reader.next().is_none());
        assert_eq!(reader.records_read(), 0);
    }

    #[test]
    fn test_reads_all_records() {
        let mut data = Vec::new();
        data.extend_from_slice(&record(80).encode());
        data.extend_from_slice(&record(443).encode());

        let ports: Vec<u16> = RecordReader::new(Cursor::new(data))
            .map(|r| r.unwrap().dest_port)
            .collect();

        assert_eq!(ports, vec![80, 443]);
    }

    #[test]
    fn test_trailing_partial_record_is_truncation() {
        let mut data = record(80).encode().to_vec();
        data.extend_from_slice(&record(443).encode()[..20]);

        let mut reader = RecordReader::new(Cursor::new(data));
        assert_eq!(reader.next().unwrap().unwrap().dest_port, 80);
        match reader.next() {
            Some(Err(CodecError::TruncatedRecord { remaining, .. })) => assert_eq!(remaining, 20),
            other => panic!("expected truncation, got {:?}", other),
        }
        assert!(reader.next().is_none());
        assert_eq!(reader.records_read(), 1);
    }

    #[test]
    fn test_short_reads_are_reassembled() {
        let mut data = Vec::new();
        for port in [22, 53, 80] {
            data.extend_from_slice(&record(port).encode());
        }
        let trickle = Trickle {
            data,
            pos: 0,
            chunk: 7,
        };

        let records: Vec<FlowRecord> = RecordReader::new(trickle).map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].dest_port, 80);
    }
}
