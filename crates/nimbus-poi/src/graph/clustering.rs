//! The structural-clustering contract.
//!
//! The SCAN-style clustering algorithm itself is an external collaborator;
//! this module defines its input/output contract and a trivial strategy
//! that keeps the clustering-enabled path total.

use serde::{Deserialize, Serialize};

use crate::graph::neighbors::NodeNeighborMap;

/// Dense small-integer cluster identifier, usable as a vector index.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct ClusterId(pub usize);

/// One cluster: an id and its member account indices.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Cluster {
    pub id: ClusterId,
    pub members: Vec<usize>,
}

impl Cluster {
    pub fn new(id: ClusterId, members: Vec<usize>) -> Self {
        Self { id, members }
    }

    /// A single-member cluster whose id is its member's index.
    pub fn singleton(member: usize) -> Self {
        Self { id: ClusterId(member), members: vec![member] }
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// The partition produced by a clustering strategy.
///
/// Every account index appears in exactly one cluster across the three
/// sets; hub and outlier clusters are typically singletons.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ClusteringResult {
    pub clusters: Vec<Cluster>,
    pub hubs: Vec<Cluster>,
    pub outliers: Vec<Cluster>,
}

impl ClusteringResult {
    pub fn new(clusters: Vec<Cluster>, hubs: Vec<Cluster>, outliers: Vec<Cluster>) -> Self {
        Self { clusters, hubs, outliers }
    }

    /// The total number of clusters across the three sets.
    pub fn cluster_count(&self) -> usize {
        self.clusters.len() + self.hubs.len() + self.outliers.len()
    }

    /// All clusters in column order: regular clusters, then hubs, then
    /// outliers. The position in this sequence is the cluster's column
    /// in the inter-level proximity matrices.
    pub fn partitions(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter().chain(&self.hubs).chain(&self.outliers)
    }
}

/// Produces a cluster/hub/outlier partition from the neighborhood
/// structure of the transition matrix.
pub trait GraphClusteringStrategy {
    fn cluster(&self, neighborhoods: &NodeNeighborMap) -> ClusteringResult;
}

/// The degenerate strategy: every node is its own outlier.
///
/// Keeps the clustering-enabled pipeline total when no real clustering
/// collaborator is wired in; with the default outlier weight this dampens
/// every account equally, so relative importances are unaffected.
#[derive(Clone, Copy, Debug, Default)]
pub struct SingletonClustering;

impl GraphClusteringStrategy for SingletonClustering {
    fn cluster(&self, neighborhoods: &NodeNeighborMap) -> ClusteringResult {
        let outliers = (0..neighborhoods.node_count()).map(Cluster::singleton).collect();
        ClusteringResult::new(Vec::new(), Vec::new(), outliers)
    }
}
