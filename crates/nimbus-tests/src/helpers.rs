//! Shared test helpers for the scenario tests.

use nimbus_core::account::AccountState;
use nimbus_core::types::{Address, Outlink};
use nimbus_poi::PoiOptions;

/// Simple address from a seed byte.
pub fn address(seed: u8) -> Address {
    Address::from_bytes([seed; 32])
}

/// An account with a vested balance checkpoint at height 1.
pub fn funded_account(seed: u8, balance_micros: u64) -> AccountState {
    let mut state = AccountState::new(address(seed));
    state.set_vested_balance(1, balance_micros);
    state
}

/// Record a transfer from `sender` at the given height.
pub fn send(sender: &mut AccountState, height: u64, amount: u64, recipient: u8) {
    sender.add_outlink(Outlink { height, amount, recipient: address(recipient) });
}

/// Options scaled down for small hand-built economies: every funded
/// account is eligible and no outlink weight is filtered as noise.
pub fn scenario_options() -> PoiOptions {
    PoiOptions {
        min_harvester_balance: 1_000,
        min_outlink_weight: 1,
        clustering_enabled: false,
        ..PoiOptions::default()
    }
}
