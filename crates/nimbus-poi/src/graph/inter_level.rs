//! Inter-level proximity matrices for the NCD-aware diffusion term.

use nimbus_math::{Matrix, SparseMatrix};

use crate::graph::clustering::ClusteringResult;
use crate::graph::neighbors::NodeNeighborMap;

/// The `(R, A)` matrix pair linking account space and cluster space.
///
/// With `n` accounts and `m` clusters (regular, hub and outlier clusters
/// all counted, in that column order):
///
/// - `A` is `n x m` membership: `A[a][c] = 1` iff account `a` belongs to
///   cluster `c`.
/// - `R` is `m x n` proximity: `R[c][a] = 1 / (|c| * cover(a))` for every
///   cluster `c` containing a node of `a`'s closed out-neighborhood,
///   where `cover(a)` is the number of distinct such clusters.
///
/// The power iteration's diffusion term is `A * (R * v)`: `R` folds the
/// account vector into cluster mass, `A` spreads each cluster's mass back
/// over its members.
#[derive(Clone, Debug)]
pub struct InterLevelProximity {
    r: SparseMatrix,
    a: SparseMatrix,
}

impl InterLevelProximity {
    /// Build the pair from a complete partition and the neighborhood map
    /// it was derived from.
    pub fn new(result: &ClusteringResult, neighborhoods: &NodeNeighborMap) -> Self {
        let node_count = neighborhoods.node_count();
        let cluster_count = result.cluster_count();

        // Account index -> (cluster column, cluster size).
        let mut membership = vec![usize::MAX; node_count];
        let mut sizes = vec![0usize; cluster_count];
        for (column, cluster) in result.partitions().enumerate() {
            sizes[column] = cluster.size();
            for &member in &cluster.members {
                membership[member] = column;
            }
        }
        debug_assert!(membership.iter().all(|&column| column != usize::MAX));

        let mut a = SparseMatrix::new(node_count, cluster_count, 1);
        for account in 0..node_count {
            a.set_unchecked(account, membership[account], 1.0);
        }

        let mut r = SparseMatrix::new(cluster_count, node_count, 1);
        let mut touched = Vec::new();
        for account in 0..node_count {
            touched.clear();
            touched.extend(
                neighborhoods.neighbors(account).iter().map(|&neighbor| membership[neighbor]),
            );
            touched.sort_unstable();
            touched.dedup();
            let cover = touched.len() as f64;
            for &column in &touched {
                r.set_unchecked(column, account, 1.0 / (sizes[column] as f64 * cover));
            }
        }

        Self { r, a }
    }

    /// The account-space to cluster-space proximity matrix.
    pub fn r(&self) -> &SparseMatrix {
        &self.r
    }

    /// The cluster-space to account-space membership matrix.
    pub fn a(&self) -> &SparseMatrix {
        &self.a
    }
}
