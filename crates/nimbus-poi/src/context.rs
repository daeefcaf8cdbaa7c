//! Transition-graph construction for one importance computation.

use std::collections::HashMap;

use nimbus_core::account::{can_harvest, AccountState};
use nimbus_core::error::PoiError;
use nimbus_core::types::{AccountImportance, Address};
use nimbus_math::{ColumnVector, Matrix, SparseMatrix};
use tracing::{debug, info};

use crate::account_info::AccountLinkProfile;
use crate::graph::clustering::{ClusteringResult, GraphClusteringStrategy};
use crate::graph::inter_level::InterLevelProximity;
use crate::graph::neighbors::NodeNeighborMap;
use crate::options::PoiOptions;

/// Everything the power iteration and the scorer need for one
/// recalculation at one grouped height.
///
/// The context is derived from the account states when constructed and
/// never mutated afterwards; `n` below is the number of
/// harvesting-eligible accounts, which defines every dimension here.
pub struct PoiContext {
    height: u64,
    /// Positions of the eligible accounts in the caller's slice, in
    /// dense-index order.
    eligible_positions: Vec<usize>,
    vested_balance_vector: ColumnVector,
    outlink_score_vector: ColumnVector,
    start_vector: ColumnVector,
    outlier_vector: ColumnVector,
    graph_weight_vector: ColumnVector,
    outlink_matrix: SparseMatrix,
    dangling_indexes: Vec<usize>,
    clustering_result: Option<ClusteringResult>,
    inter_level: Option<InterLevelProximity>,
}

impl PoiContext {
    /// Build the transition graph over the eligible accounts at `height`.
    ///
    /// Fails with [`PoiError::NoEligibleAccounts`] when no account meets
    /// the minimum harvester balance.
    pub fn new(
        height: u64,
        accounts: &[AccountState],
        options: &PoiOptions,
        clustering: &dyn GraphClusteringStrategy,
    ) -> Result<Self, PoiError> {
        let eligible_positions: Vec<usize> = (0..accounts.len())
            .filter(|&position| {
                can_harvest(&accounts[position], height, options.min_harvester_balance)
            })
            .collect();
        if eligible_positions.is_empty() {
            return Err(PoiError::NoEligibleAccounts);
        }
        let n = eligible_positions.len();
        info!(height, accounts = n, "building transition graph");

        let mut profiles: Vec<AccountLinkProfile> = eligible_positions
            .iter()
            .enumerate()
            .map(|(index, &position)| AccountLinkProfile::new(index, &accounts[position], height))
            .collect();
        let index_of: HashMap<Address, usize> = profiles
            .iter()
            .map(|profile| (profile.address(), profile.index()))
            .collect();

        // Reverse pass: every edge A -> B between eligible accounts
        // reduces B's net outlink back to A, so reciprocal flows cancel
        // instead of double counting. A == B is included: a self-transfer
        // nets itself to zero.
        let mut inlinks = Vec::new();
        for profile in &profiles {
            for link in profile.outlinks() {
                if let Some(&recipient) = index_of.get(&link.recipient) {
                    inlinks.push((recipient, profile.address(), link.weight));
                }
            }
        }
        let total_outlinks = inlinks.len();
        for (recipient, sender, weight) in inlinks {
            profiles[recipient].subtract_inlink(sender, weight);
        }

        let mut vested_balance_vector = ColumnVector::new(n)?;
        let mut outlink_score_vector = ColumnVector::new(n)?;
        for (index, &position) in eligible_positions.iter().enumerate() {
            vested_balance_vector.set(index, accounts[position].vested_balance(height) as f64);
            let net_score = profiles[index].net_outlink_score();
            let weight = if net_score < 0.0 { options.negative_outlink_weight } else { 1.0 };
            outlink_score_vector.set(index, net_score * weight);
        }

        // Columns are source accounts, rows are destinations.
        let mut outlink_matrix = SparseMatrix::new(n, n, (total_outlinks / n).max(1));
        for profile in &profiles {
            for (recipient, weight) in profile.net_outlinks() {
                if weight == 0.0 {
                    continue;
                }
                if let Some(&row) = index_of.get(&recipient) {
                    if row != profile.index() {
                        outlink_matrix.increment(row, profile.index(), weight)?;
                    }
                }
            }
        }
        // Noise filtering must precede normalization: dropping an entry
        // can empty a column, and only then is the column dangling.
        outlink_matrix.remove_less_than(options.min_outlink_weight as f64);
        let dangling_indexes = outlink_matrix.normalize_columns()?;

        let mut start_vector = ColumnVector::new(n)?;
        start_vector.set_all(1.0);
        start_vector.normalize();

        let outlier_vector = ColumnVector::new(n)?;
        let mut graph_weight_vector = ColumnVector::new(n)?;
        graph_weight_vector.set_all(1.0);

        let mut context = Self {
            height,
            eligible_positions,
            vested_balance_vector,
            outlink_score_vector,
            start_vector,
            outlier_vector,
            graph_weight_vector,
            outlink_matrix,
            dangling_indexes,
            clustering_result: None,
            inter_level: None,
        };
        if options.clustering_enabled {
            context.cluster(options, clustering);
        } else {
            debug!("clustering is bypassed");
        }
        Ok(context)
    }

    fn cluster(&mut self, options: &PoiOptions, clustering: &dyn GraphClusteringStrategy) {
        let neighborhoods = NodeNeighborMap::new(&self.outlink_matrix);
        let result = clustering.cluster(&neighborhoods);
        info!(
            clusters = result.clusters.len(),
            hubs = result.hubs.len(),
            outliers = result.outliers.len(),
            "transition graph clustered"
        );
        for cluster in &result.outliers {
            for &member in &cluster.members {
                self.outlier_vector.set(member, 1.0);
                self.graph_weight_vector.set(member, options.outlier_weight);
            }
        }
        self.inter_level = Some(InterLevelProximity::new(&result, &neighborhoods));
        self.clustering_result = Some(result);
    }

    /// The grouped height this context was built for.
    pub fn height(&self) -> u64 {
        self.height
    }

    /// The number of eligible accounts.
    pub fn account_count(&self) -> usize {
        self.eligible_positions.len()
    }

    /// Positions of the eligible accounts in the caller's slice, ordered
    /// by dense index.
    pub fn eligible_positions(&self) -> &[usize] {
        &self.eligible_positions
    }

    /// Vested balances (micro-coins) of the eligible accounts.
    pub fn vested_balance_vector(&self) -> &ColumnVector {
        &self.vested_balance_vector
    }

    /// Net outlink scores, negative entries already dampened.
    pub fn outlink_score_vector(&self) -> &ColumnVector {
        &self.outlink_score_vector
    }

    /// The uniform iteration start vector.
    pub fn start_vector(&self) -> &ColumnVector {
        &self.start_vector
    }

    /// 1.0 at outlier accounts, 0.0 elsewhere.
    pub fn outlier_vector(&self) -> &ColumnVector {
        &self.outlier_vector
    }

    /// Score dampening per account: `outlier_weight` at outliers, 1.0
    /// elsewhere.
    pub fn graph_weight_vector(&self) -> &ColumnVector {
        &self.graph_weight_vector
    }

    /// The column-stochastic transition matrix.
    pub fn outlink_matrix(&self) -> &SparseMatrix {
        &self.outlink_matrix
    }

    /// Columns with no surviving outgoing weight.
    pub fn dangling_indexes(&self) -> &[usize] {
        &self.dangling_indexes
    }

    /// The partition, when clustering ran.
    pub fn clustering_result(&self) -> Option<&ClusteringResult> {
        self.clustering_result.as_ref()
    }

    /// The inter-level proximity pair, when clustering ran.
    pub fn inter_level(&self) -> Option<&InterLevelProximity> {
        self.inter_level.as_ref()
    }

    /// Write the computed scores back into the eligible accounts.
    ///
    /// Sets each account's importance slot and appends to its historical
    /// log; called only after the whole pipeline has succeeded.
    pub fn update_importances(
        &self,
        accounts: &mut [AccountState],
        importances: &ColumnVector,
        page_ranks: &ColumnVector,
    ) -> Result<(), PoiError> {
        for (vector, name) in [(importances, "importance"), (page_ranks, "page rank")] {
            if vector.size() != self.account_count() {
                return Err(PoiError::UnexpectedDimension {
                    vector: name,
                    expected: self.account_count(),
                    actual: vector.size(),
                });
            }
        }
        for (index, &position) in self.eligible_positions.iter().enumerate() {
            accounts[position].record_importance(AccountImportance {
                height: self.height,
                importance: importances.get(index),
                page_rank: page_ranks.get(index),
            });
        }
        Ok(())
    }
}
