//! The POI specialization of the power iteration.

use nimbus_core::constants::{DEFAULT_CONVERGENCE_EPSILON, DEFAULT_MAX_ITERATIONS};
use nimbus_core::error::PoiError;
use nimbus_math::{ColumnVector, Matrix, PowerIteration};
use tracing::debug;

use crate::context::PoiContext;
use crate::options::PoiOptions;

/// Runs the teleporting power iteration over a finalized transition
/// graph.
///
/// Each step propagates mass along the outlink matrix, redistributes the
/// mass parked on dangling accounts uniformly, broadcasts the residual
/// teleportation share, and, when clustering ran, diffuses mass through
/// the cluster level.
pub struct PoiPowerIterator<'a> {
    context: &'a PoiContext,
    options: &'a PoiOptions,
}

impl<'a> PoiPowerIterator<'a> {
    pub fn new(context: &'a PoiContext, options: &'a PoiOptions) -> Self {
        Self { context, options }
    }

    /// Iterate to the stationary page-rank vector.
    ///
    /// Non-convergence within the iteration budget is fatal: an
    /// unconverged vector must never reach consensus state.
    pub fn run(&self) -> Result<ColumnVector, PoiError> {
        let n = self.context.account_count() as f64;
        let teleportation = self.options.teleportation_probability;
        let inter_level_teleportation = self.options.inter_level_teleportation_probability;
        let inverse_teleportation = self.options.inverse_teleportation_probability();
        let iteration =
            PowerIteration::new(DEFAULT_MAX_ITERATIONS, DEFAULT_CONVERGENCE_EPSILON / n);

        let outcome = iteration.run(self.context.start_vector().clone(), |previous| {
            let dangling_sum: f64 = self
                .context
                .dangling_indexes()
                .iter()
                .map(|&index| previous.get(index))
                .sum();
            let broadcast = dangling_sum * teleportation / n + inverse_teleportation / n;
            let propagated = self.context.outlink_matrix().multiply(previous)?;
            let mut next = propagated.multiply(teleportation).add(broadcast);
            if let Some(pair) = self.context.inter_level() {
                let cluster_mass = pair.r().multiply(previous)?;
                let diffused = pair.a().multiply(&cluster_mass)?;
                next = next.add_element_wise(&diffused.multiply(inter_level_teleportation))?;
            }
            Ok(next)
        })?;

        debug!(
            iterations = outcome.iterations,
            converged = outcome.converged,
            "power iteration finished"
        );
        if !outcome.converged {
            return Err(PoiError::NotConverged { iterations: outcome.iterations });
        }
        Ok(outcome.vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::clustering::SingletonClustering;
    use nimbus_core::account::AccountState;
    use nimbus_core::types::{Address, Outlink};

    const HEIGHT: u64 = 10_000;

    fn account(tag: u8, outlinks: &[(u64, u8)]) -> AccountState {
        let mut state = AccountState::new(Address::from_bytes([tag; 32]));
        state.set_vested_balance(1, 5_000);
        for &(amount, recipient) in outlinks {
            state.add_outlink(Outlink {
                height: HEIGHT,
                amount,
                recipient: Address::from_bytes([recipient; 32]),
            });
        }
        state
    }

    fn options() -> PoiOptions {
        PoiOptions {
            min_harvester_balance: 1_000,
            min_outlink_weight: 1,
            clustering_enabled: false,
            ..PoiOptions::default()
        }
    }

    fn run(accounts: &[AccountState], options: &PoiOptions) -> ColumnVector {
        let context = PoiContext::new(HEIGHT, accounts, options, &SingletonClustering).unwrap();
        PoiPowerIterator::new(&context, options).run().unwrap()
    }

    #[test]
    fn symmetric_accounts_converge_to_a_uniform_vector() {
        // No transfers at all: every account is dangling and the mass
        // stays uniform.
        let accounts = vec![account(1, &[]), account(2, &[]), account(3, &[])];
        let result = run(&accounts, &options());
        for index in 0..3 {
            assert!((result.get(index) - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn the_result_is_a_distribution() {
        let accounts = vec![
            account(1, &[(500, 2)]),
            account(2, &[(100, 3)]),
            account(3, &[]),
        ];
        let result = run(&accounts, &options());
        assert!((result.abs_sum() - 1.0).abs() < 1e-9);
        assert!(result.as_slice().iter().all(|&mass| mass > 0.0));
    }

    #[test]
    fn receiving_accounts_accumulate_more_mass() {
        // 1 and 2 both send everything to 3.
        let accounts = vec![
            account(1, &[(500, 3)]),
            account(2, &[(500, 3)]),
            account(3, &[]),
        ];
        let result = run(&accounts, &options());
        assert!(result.get(2) > result.get(0));
        assert!(result.get(2) > result.get(1));
    }

    #[test]
    fn dangling_accounts_keep_non_zero_mass() {
        let accounts = vec![
            account(1, &[(500, 2)]),
            account(2, &[]),
            account(3, &[]),
        ];
        let result = run(&accounts, &options());
        // 3 neither sends nor receives, but teleportation and dangling
        // redistribution still reach it.
        assert!(result.get(2) > 0.0);
    }

    #[test]
    fn cluster_diffusion_preserves_the_distribution_invariant() {
        let mut opts = options();
        opts.clustering_enabled = true;
        let accounts = vec![
            account(1, &[(500, 2)]),
            account(2, &[(200, 1)]),
            account(3, &[]),
        ];
        let result = run(&accounts, &opts);
        assert!((result.abs_sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn identical_inputs_produce_identical_vectors() {
        let accounts = vec![
            account(1, &[(500, 2)]),
            account(2, &[(100, 3)]),
            account(3, &[]),
        ];
        let first = run(&accounts, &options());
        let second = run(&accounts, &options());
        assert_eq!(first.as_slice(), second.as_slice());
    }
}
