//! Network prefix masking for IPv4 and IPv6 addresses.
//!
//! Masking walks the address bytes from most to least significant, keeping
//! whole bytes while the remaining prefix covers them, truncating the byte
//! where the prefix ends and zeroing everything after it.

use crate::parser::AddressFamily;
use crate::utils::config::{IPV4_MAX_PREFIX, IPV6_MAX_PREFIX};
use crate::utils::error::ConfigError;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Prefix lengths applied to each family when masking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskConfig {
    ipv4_prefix: u8,
    ipv6_prefix: u8,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            ipv4_prefix: IPV4_MAX_PREFIX,
            ipv6_prefix: IPV6_MAX_PREFIX,
        }
    }
}

impl MaskConfig {
    /// Create a validated mask configuration
    ///
    /// # Errors
    /// * `ConfigError::PrefixOutOfRange` - prefix longer than the family allows
    pub fn new(ipv4_prefix: u8, ipv6_prefix: u8) -> Result<Self, ConfigError> {
        Self::default()
            .with_ipv4_prefix(ipv4_prefix)?
            .with_ipv6_prefix(ipv6_prefix)
    }

    pub fn with_ipv4_prefix(mut self, prefix: u8) -> Result<Self, ConfigError> {
        if prefix > IPV4_MAX_PREFIX {
            return Err(ConfigError::PrefixOutOfRange {
                family: "IPv4",
                prefix,
                max: IPV4_MAX_PREFIX,
            });
        }
        self.ipv4_prefix = prefix;
        Ok(self)
    }

    pub fn with_ipv6_prefix(mut self, prefix: u8) -> Result<Self, ConfigError> {
        if prefix > IPV6_MAX_PREFIX {
            return Err(ConfigError::PrefixOutOfRange {
                family: "IPv6",
                prefix,
                max: IPV6_MAX_PREFIX,
            });
        }
        self.ipv6_prefix = prefix;
        Ok(self)
    }

    pub fn ipv4_prefix(&self) -> u8 {
        self.ipv4_prefix
    }

    pub fn ipv6_prefix(&self) -> u8 {
        self.ipv6_prefix
    }
}

/// Keep the first `prefix` bits of `bytes`, zero the rest
fn apply_prefix(bytes: &mut [u8], prefix: u8) {
    let mut remaining = prefix;
    for byte in bytes.iter_mut() {
        if remaining >= 8 {
            remaining -= 8;
        } else if remaining > 0 {
            *byte &= 0xFFu8 << (8 - remaining);
            remaining = 0;
        } else {
            *byte = 0;
        }
    }
}

/// Mask the IPv4 address embedded in the last 4 bytes of `storage`
///
/// Prefixes of 32 or more leave the address untouched.
pub fn mask_ipv4(storage: &[u8; 16], prefix: u8) -> Ipv4Addr {
    let mut octets = [0u8; 4];
    octets.copy_from_slice(&storage[12..]);
    if prefix < IPV4_MAX_PREFIX {
        apply_prefix(&mut octets, prefix);
    }
    Ipv4Addr::from(octets)
}

/// Mask a full 16-byte IPv6 address
///
/// Prefixes of 128 or more leave the address untouched. The result's
/// `Display` follows RFC 5952, so IPv4-compatible addresses come out in
/// hex: `::1.2.3.4` renders as `::102:304`.
pub fn mask_ipv6(storage: &[u8; 16], prefix: u8) -> Ipv6Addr {
    let mut octets = *storage;
    if prefix < IPV6_MAX_PREFIX {
        apply_prefix(&mut octets, prefix);
    }
    Ipv6Addr::from(octets)
}

/// Mask `storage` for `family` and render it as text
///
/// IPv6 uses the IPv6 prefix; every other family, including an
/// unrecognized tag, is treated as IPv4.
pub fn mask_address(storage: &[u8; 16], family: AddressFamily, masks: &MaskConfig) -> String {
    match family {
        AddressFamily::Ipv6 => mask_ipv6(storage, masks.ipv6_prefix).to_string(),
        AddressFamily::Ipv4 | AddressFamily::Unrecognized(_) => {
            mask_ipv4(storage, masks.ipv4_prefix).to_string()
        }
    }
}
