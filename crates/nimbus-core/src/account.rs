//! Per-account harvesting state.
//!
//! [`AccountState`] is the long-lived record the importance engine reads
//! during graph construction and writes exactly once at the end of a
//! successful recalculation. It holds the vested balance history, the
//! outgoing-transfer log, the current importance slot, and an append-only
//! historical-importance log.

use serde::{Deserialize, Serialize};

use crate::types::{AccountImportance, Address, Outlink};

/// Mutable per-account state consumed and updated by the importance engine.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AccountState {
    /// The account's address.
    pub address: Address,
    /// Vested balance checkpoints as `(height, micros)`, sorted by height.
    ///
    /// A lookup at height `h` returns the latest checkpoint at or below `h`.
    vested_balances: Vec<(u64, u64)>,
    /// Outgoing transfers, sorted by ascending block height.
    outlinks: Vec<Outlink>,
    /// The most recent importance record, if any recalculation has run.
    importance: Option<AccountImportance>,
    /// Append-only log of past importance records.
    historical_importances: Vec<AccountImportance>,
}

impl AccountState {
    /// Create an empty account state for the given address.
    pub fn new(address: Address) -> Self {
        Self { address, ..Default::default() }
    }

    /// Record a vested balance checkpoint.
    ///
    /// Checkpoints must be added in ascending height order; a checkpoint at
    /// an existing height replaces the previous value.
    pub fn set_vested_balance(&mut self, height: u64, micros: u64) {
        match self.vested_balances.binary_search_by_key(&height, |&(h, _)| h) {
            Ok(i) => self.vested_balances[i].1 = micros,
            Err(i) => self.vested_balances.insert(i, (height, micros)),
        }
    }

    /// Vested balance in micros at the given height.
    ///
    /// Returns the latest checkpoint at or below `height`, or 0 if none.
    pub fn vested_balance(&self, height: u64) -> u64 {
        match self.vested_balances.binary_search_by_key(&height, |&(h, _)| h) {
            Ok(i) => self.vested_balances[i].1,
            Err(0) => 0,
            Err(i) => self.vested_balances[i - 1].1,
        }
    }

    /// Append an outgoing transfer to the log.
    ///
    /// Outlinks must be appended in ascending height order.
    pub fn add_outlink(&mut self, outlink: Outlink) {
        debug_assert!(self.outlinks.last().map_or(true, |last| last.height <= outlink.height));
        self.outlinks.push(outlink);
    }

    /// Outlinks with height in the inclusive range `[from, to]`.
    pub fn outlinks_in_range(&self, from: u64, to: u64) -> &[Outlink] {
        let start = self.outlinks.partition_point(|link| link.height < from);
        let end = self.outlinks.partition_point(|link| link.height <= to);
        &self.outlinks[start..end]
    }

    /// Number of outlinks within the history window ending at `height`.
    pub fn outlink_count(&self, from: u64, to: u64) -> usize {
        self.outlinks_in_range(from, to).len()
    }

    /// The current importance record, if any.
    pub fn importance(&self) -> Option<&AccountImportance> {
        self.importance.as_ref()
    }

    /// The append-only historical importance log.
    pub fn historical_importances(&self) -> &[AccountImportance] {
        &self.historical_importances
    }

    /// Replace the importance slot and append to the historical log.
    ///
    /// Called exactly once per successful recalculation.
    pub fn record_importance(&mut self, record: AccountImportance) {
        self.importance = Some(record);
        self.historical_importances.push(record);
    }
}

/// Whether an account is eligible to harvest at the given height.
///
/// Eligibility requires a vested balance of at least `min_balance` micros.
pub fn can_harvest(state: &AccountState, height: u64, min_balance: u64) -> bool {
    state.vested_balance(height) >= min_balance
}
