//! Node addresses and caller identity.
//!
//! A node address is the 20-byte account identity a node registers with.
//! `Caller` is the explicit identity capability every mutating DAO
//! operation receives instead of reading an ambient "sender".

use super::error::{DaoError, DaoResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of a node address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Node address (20 bytes, `0x`-prefixed hex in text form).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeAddress([u8; ADDRESS_LEN]);

impl NodeAddress {
    /// Create from raw bytes.
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a byte slice.
    pub fn from_slice(bytes: &[u8]) -> DaoResult<Self> {
        let arr: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| {
            DaoError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    /// Get bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Short display form for logs (first 4 bytes).
    pub fn short(&self) -> String {
        format!("0x{}…", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for NodeAddress {
    type Err = DaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != ADDRESS_LEN * 2 {
            return Err(DaoError::InvalidAddress(format!(
                "expected {} hex characters, got {}",
                ADDRESS_LEN * 2,
                digits.len()
            )));
        }

        let bytes =
            hex::decode(digits).map_err(|e| DaoError::InvalidAddress(format!("{}: {}", s, e)))?;
        Self::from_slice(&bytes)
    }
}

/// Identity of whoever invokes a DAO operation.
///
/// Authorization (owner vs. member vs. anyone) is decided against this value
/// by the operation itself; nothing is read from ambient context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Caller(NodeAddress);

impl Caller {
    pub fn new(address: NodeAddress) -> Self {
        Self(address)
    }

    pub fn address(&self) -> NodeAddress {
        self.0
    }
}

impl From<NodeAddress> for Caller {
    fn from(address: NodeAddress) -> Self {
        Self(address)
    }
}
