//! Graph-structure collaborators of the transition matrix: neighborhood
//! extraction, the clustering contract, and the inter-level proximity
//! matrices used by the NCD-aware propagation step.

pub mod clustering;
pub mod inter_level;
pub mod neighbors;
