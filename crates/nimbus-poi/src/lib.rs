//! # nimbus-poi
//!
//! The proof-of-importance engine. Once per grouped block height the
//! [`ImportanceCalculator`] turns the harvesting-eligible accounts'
//! transfer histories into a column-stochastic transition graph, runs a
//! teleporting power iteration over it (with dangling-mass redistribution
//! and optional inter-cluster diffusion), and fuses the stationary vector
//! with vested balances and net outlink scores into the per-account
//! consensus weight.
//!
//! The engine is synchronous, CPU-bound and deterministic: identical
//! inputs produce bitwise-identical importances on every node. Failures
//! (no eligible accounts, non-convergence, dimension errors) abort the
//! recalculation before any account state is touched.

pub mod account_info;
pub mod calculator;
pub mod context;
pub mod graph;
pub mod options;
pub mod power;
pub mod scorer;

pub use account_info::{AccountLinkProfile, WeightedLink};
pub use calculator::ImportanceCalculator;
pub use context::PoiContext;
pub use graph::clustering::{
    Cluster, ClusterId, ClusteringResult, GraphClusteringStrategy, SingletonClustering,
};
pub use graph::inter_level::InterLevelProximity;
pub use graph::neighbors::NodeNeighborMap;
pub use options::PoiOptions;
pub use power::PoiPowerIterator;
pub use scorer::{ImportanceScorer, PoiScorer, ScorerContext};
