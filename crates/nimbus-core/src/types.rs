//! Core protocol types for the importance engine.
//!
//! All monetary values are in micros (1 coin = 10^6 micros).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte account address.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// The zero address (32 zero bytes).
    pub const ZERO: Self = Self([0u8; 32]);

    /// Create an Address from a byte array.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A single historical outgoing transfer.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Outlink {
    /// Block height at which the transfer was included.
    pub height: u64,
    /// Transferred amount in micros.
    pub amount: u64,
    /// Receiving account.
    pub recipient: Address,
}

/// The importance record written back after a recalculation.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct AccountImportance {
    /// Grouped height the record applies to.
    pub height: u64,
    /// Final fused importance score.
    pub importance: f64,
    /// Raw page-rank component before fusion.
    pub page_rank: f64,
}
