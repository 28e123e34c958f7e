//! Aggregation modes and key derivation.
//!
//! A mode selects which field of a flow record becomes the grouping key.
//! Strict per-family modes skip records of the other family; the adaptive
//! `srcip`/`dstip` modes pick the prefix by family and treat anything that
//! is not IPv6 as IPv4.

use super::mask::{mask_address, mask_ipv4, mask_ipv6, MaskConfig};
use crate::parser::{AddressFamily, FlowRecord};
use crate::utils::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Which record field records are grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationMode {
    SourcePort,
    DestPort,
    SourceIpv6,
    DestIpv6,
    SourceIpv4,
    DestIpv4,
    /// Source address, prefix chosen by the record's family
    SourceIp,
    /// Destination address, prefix chosen by the record's family
    DestIp,
}

impl AggregationMode {
    /// Derive the grouping key for `record`
    ///
    /// **Public** - called once per decoded record
    ///
    /// # Returns
    /// `None` when a strict per-family mode meets a record of another family
    pub fn derive_key(&self, record: &FlowRecord, masks: &MaskConfig) -> Option<String> {
        match self {
            AggregationMode::SourcePort => Some(record.source_port.to_string()),
            AggregationMode::DestPort => Some(record.dest_port.to_string()),
            AggregationMode::SourceIpv6 => (record.family == AddressFamily::Ipv6)
                .then(|| mask_ipv6(&record.source_address, masks.ipv6_prefix()).to_string()),
            AggregationMode::DestIpv6 => (record.family == AddressFamily::Ipv6)
                .then(|| mask_ipv6(&record.dest_address, masks.ipv6_prefix()).to_string()),
            AggregationMode::SourceIpv4 => (record.family == AddressFamily::Ipv4)
                .then(|| mask_ipv4(&record.source_address, masks.ipv4_prefix()).to_string()),
            AggregationMode::DestIpv4 => (record.family == AddressFamily::Ipv4)
                .then(|| mask_ipv4(&record.dest_address, masks.ipv4_prefix()).to_string()),
            AggregationMode::SourceIp => {
                Some(mask_address(&record.source_address, record.family, masks))
            }
            AggregationMode::DestIp => Some(mask_address(&record.dest_address, record.family, masks)),
        }
    }

    /// Column name used in the report header
    pub fn key_name(&self) -> &'static str {
        match self {
            AggregationMode::SourcePort => "srcport",
            AggregationMode::DestPort => "dstport",
            AggregationMode::SourceIpv6 | AggregationMode::SourceIpv4 | AggregationMode::SourceIp => {
                "srcip"
            }
            AggregationMode::DestIpv6 | AggregationMode::DestIpv4 | AggregationMode::DestIp => {
                "dstip"
            }
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AggregationMode::SourcePort => "srcport",
            AggregationMode::DestPort => "dstport",
            AggregationMode::SourceIpv6 => "srcip6",
            AggregationMode::DestIpv6 => "dstip6",
            AggregationMode::SourceIpv4 => "srcip4",
            AggregationMode::DestIpv4 => "dstip4",
            AggregationMode::SourceIp => "srcip",
            AggregationMode::DestIp => "dstip",
        };
        f.write_str(name)
    }
}

/// A mode together with the prefixes it masks with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationConfig {
    pub mode: AggregationMode,
    pub masks: MaskConfig,
}

impl AggregationConfig {
    pub fn new(mode: AggregationMode, masks: MaskConfig) -> Self {
        Self { mode, masks }
    }

    pub fn derive_key(&self, record: &FlowRecord) -> Option<String> {
        self.mode.derive_key(record, &self.masks)
    }
}

impl FromStr for AggregationConfig {
    type Err = ConfigError;

    /// Parse `srcport`, `dstport`, `srcip`, `dstip`, or
    /// `srcip4`/`dstip4`/`srcip6`/`dstip6` with an optional `/<prefix>`
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let fixed = match text {
            "srcport" => Some(AggregationMode::SourcePort),
            "dstport" => Some(AggregationMode::DestPort),
            "srcip" => Some(AggregationMode::SourceIp),
            "dstip" => Some(AggregationMode::DestIp),
            _ => None,
        };
        if let Some(mode) = fixed {
            return Ok(Self::new(mode, MaskConfig::default()));
        }

        let (name, prefix) = match text.split_once('/') {
            Some((name, prefix)) => (name, Some(prefix)),
            None => (text, None),
        };

        let mode = match name {
            "srcip4" => AggregationMode::SourceIpv4,
            "dstip4" => AggregationMode::DestIpv4,
            "srcip6" => AggregationMode::SourceIpv6,
            "dstip6" => AggregationMode::DestIpv6,
            _ => return Err(ConfigError::UnknownAggregation(text.to_string())),
        };

        let Some(prefix) = prefix else {
            return Ok(Self::new(mode, MaskConfig::default()));
        };

        // Digits only: u8::from_str would also take a leading '+'
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::InvalidPrefix(prefix.to_string()));
        }
        let prefix: u8 = prefix
            .parse()
            .map_err(|_| ConfigError::InvalidPrefix(prefix.to_string()))?;

        let masks = match mode {
            AggregationMode::SourceIpv4 | AggregationMode::DestIpv4 => {
                MaskConfig::default().with_ipv4_prefix(prefix)?
            }
            _ => MaskConfig::default().with_ipv6_prefix(prefix)?,
        };

        Ok(Self::new(mode, masks))
    }
}
