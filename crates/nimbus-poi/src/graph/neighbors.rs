//! Neighborhood structure of the transition matrix.

use nimbus_math::{Matrix, SparseMatrix};

/// Per-node closed out-neighborhoods of a finalized transition matrix.
///
/// Columns of the matrix are source accounts, so the out-neighbors of
/// node `a` are the rows holding a non-zero entry in column `a`. Each
/// neighborhood includes the node itself and is sorted ascending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeNeighborMap {
    neighborhoods: Vec<Vec<usize>>,
}

impl NodeNeighborMap {
    /// Build the neighborhood map from a finalized matrix.
    pub fn new(matrix: &SparseMatrix) -> Self {
        let mut neighborhoods: Vec<Vec<usize>> =
            (0..matrix.column_count()).map(|node| vec![node]).collect();
        matrix.for_each(&mut |row, col, _| {
            if row != col {
                neighborhoods[col].push(row);
            }
        });
        for neighborhood in &mut neighborhoods {
            neighborhood.sort_unstable();
        }
        Self { neighborhoods }
    }

    /// The number of nodes.
    pub fn node_count(&self) -> usize {
        self.neighborhoods.len()
    }

    /// The closed out-neighborhood of `node`, sorted ascending.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.neighborhoods[node]
    }
}
