//! Per-account link extraction: decayed outlink weights and net flows.

use std::collections::BTreeMap;

use nimbus_core::account::AccountState;
use nimbus_core::constants::{
    ESTIMATED_BLOCKS_PER_DAY, OUTLINK_DECAY_BASE, OUTLINK_HISTORY_BLOCKS,
};
use nimbus_core::types::Address;

/// A decayed, directed transfer-derived edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedLink {
    pub recipient: Address,
    pub weight: f64,
}

/// One eligible account's view of the outlink graph for one computation.
///
/// `index` is the account's row/column in the transition matrix, assigned
/// sequentially over the eligible accounts. The net-outlink map starts as
/// the per-counterparty decayed outlink sums and is decremented by inlink
/// weights during the graph builder's reverse pass, so entries (and the
/// overall score) can go negative for net receivers.
#[derive(Clone, Debug)]
pub struct AccountLinkProfile {
    index: usize,
    address: Address,
    outlinks: Vec<WeightedLink>,
    net_outlinks: BTreeMap<Address, f64>,
}

impl AccountLinkProfile {
    /// Extract the decayed outlinks of `state` at evaluation height
    /// `height`.
    ///
    /// Only transfers inside the lookback window
    /// `[max(1, height - OUTLINK_HISTORY_BLOCKS), height]` contribute;
    /// each is decayed by `OUTLINK_DECAY_BASE` per elapsed day.
    pub fn new(index: usize, state: &AccountState, height: u64) -> Self {
        let start_height = height.saturating_sub(OUTLINK_HISTORY_BLOCKS).max(1);
        let mut outlinks = Vec::new();
        let mut net_outlinks = BTreeMap::new();
        for outlink in state.outlinks_in_range(start_height, height) {
            let age_in_days = (height - outlink.height) / ESTIMATED_BLOCKS_PER_DAY;
            let weight = outlink.amount as f64 * OUTLINK_DECAY_BASE.powi(age_in_days as i32);
            outlinks.push(WeightedLink { recipient: outlink.recipient, weight });
            *net_outlinks.entry(outlink.recipient).or_insert(0.0) += weight;
        }
        Self { index, address: state.address, outlinks, net_outlinks }
    }

    /// The account's dense matrix index for this computation.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The account's address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The decayed outlinks inside the lookback window, in history order.
    pub fn outlinks(&self) -> &[WeightedLink] {
        &self.outlinks
    }

    /// The per-counterparty net weights, ordered by counterparty address.
    pub fn net_outlinks(&self) -> impl Iterator<Item = (Address, f64)> + '_ {
        self.net_outlinks.iter().map(|(&address, &weight)| (address, weight))
    }

    /// Subtract an inlink weight received from `sender`.
    ///
    /// Called by the graph builder's reverse pass; a counterparty this
    /// account never sent to ends up with a negative entry.
    pub fn subtract_inlink(&mut self, sender: Address, weight: f64) {
        *self.net_outlinks.entry(sender).or_insert(0.0) -= weight;
    }

    /// The sum of all net outlink weights.
    pub fn net_outlink_score(&self) -> f64 {
        self.net_outlinks.values().sum()
    }
}
