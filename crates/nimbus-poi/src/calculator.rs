//! The recalculation orchestrator.

use std::time::Instant;

use nimbus_core::account::AccountState;
use nimbus_core::error::PoiError;
use tracing::info;

use crate::context::PoiContext;
use crate::graph::clustering::{GraphClusteringStrategy, SingletonClustering};
use crate::options::PoiOptions;
use crate::power::PoiPowerIterator;
use crate::scorer::{ImportanceScorer, PoiScorer, ScorerContext};

/// Wires the transition graph, the power iteration and the scorer
/// together for one recalculation per grouped height.
///
/// The caller is responsible for grouping the height
/// ([`nimbus_core::constants::grouped_height`]) and for serializing
/// concurrent recalculations.
pub struct ImportanceCalculator {
    options: PoiOptions,
    scorer: Box<dyn ImportanceScorer>,
    clustering: Box<dyn GraphClusteringStrategy>,
}

impl ImportanceCalculator {
    /// A calculator with the protocol scorer and the singleton
    /// clustering strategy.
    pub fn new(options: PoiOptions) -> Self {
        Self::with_strategies(options, Box::new(PoiScorer), Box::new(SingletonClustering))
    }

    /// A calculator with explicit scorer and clustering collaborators.
    pub fn with_strategies(
        options: PoiOptions,
        scorer: Box<dyn ImportanceScorer>,
        clustering: Box<dyn GraphClusteringStrategy>,
    ) -> Self {
        Self { options, scorer, clustering }
    }

    /// Recompute and store the importance of every eligible account at
    /// the given grouped height.
    ///
    /// Either the whole pipeline succeeds and every eligible account's
    /// importance record is updated, or an error is returned and no
    /// account state is touched.
    pub fn recalculate(
        &self,
        height: u64,
        accounts: &mut [AccountState],
    ) -> Result<(), PoiError> {
        let started = Instant::now();
        let context =
            PoiContext::new(height, accounts, &self.options, self.clustering.as_ref())?;
        let page_ranks = PoiPowerIterator::new(&context, &self.options).run()?;
        let scores = self.scorer.final_score(&ScorerContext {
            importances: &page_ranks,
            outlink_scores: context.outlink_score_vector(),
            vested_balances: context.vested_balance_vector(),
            graph_weights: context.graph_weight_vector(),
        })?;
        context.update_importances(accounts, &scores, &page_ranks)?;
        info!(
            height,
            accounts = context.account_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "importance recalculated"
        );
        Ok(())
    }
}
