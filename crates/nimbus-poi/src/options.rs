//! Importance engine configuration.

use nimbus_core::constants::MICROS_PER_COIN;
use serde::{Deserialize, Serialize};

/// Tunable parameters of one importance computation.
///
/// All fields are public and the defaults are the protocol values; nodes
/// must agree on every field for consensus to hold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoiOptions {
    /// Minimum vested balance (in micro-coins) for an account to be
    /// included in the computation at all.
    pub min_harvester_balance: u64,
    /// Matrix entries below this weight (in micro-coins) are dropped as
    /// noise before normalization.
    pub min_outlink_weight: u64,
    /// Multiplier applied to an account's net outlink score when it is
    /// negative (a net receiver).
    pub negative_outlink_weight: f64,
    /// Graph-weight entry assigned to outlier accounts; everything else
    /// keeps weight 1.0.
    pub outlier_weight: f64,
    /// Fraction of importance mass propagated along graph edges each
    /// iteration.
    pub teleportation_probability: f64,
    /// Fraction of importance mass diffused through the cluster level
    /// each iteration (only when clustering is enabled).
    pub inter_level_teleportation_probability: f64,
    /// Whether to run the structural clustering pass.
    pub clustering_enabled: bool,
    /// Minimum neighborhood size for a node to seed a cluster.
    pub mu_clustering_value: u32,
    /// Structural similarity threshold for cluster membership.
    pub epsilon_clustering_value: f64,
}

impl PoiOptions {
    /// The residual probability redistributed uniformly each iteration.
    pub fn inverse_teleportation_probability(&self) -> f64 {
        1.0 - self.teleportation_probability - self.inter_level_teleportation_probability
    }
}

impl Default for PoiOptions {
    fn default() -> Self {
        Self {
            min_harvester_balance: 10_000 * MICROS_PER_COIN,
            min_outlink_weight: 1_000 * MICROS_PER_COIN,
            negative_outlink_weight: 0.6,
            outlier_weight: 0.9,
            teleportation_probability: 0.75,
            inter_level_teleportation_probability: 0.1,
            clustering_enabled: true,
            mu_clustering_value: 4,
            epsilon_clustering_value: 0.65,
        }
    }
}
