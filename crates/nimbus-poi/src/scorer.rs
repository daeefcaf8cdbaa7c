//! Final score fusion.

use nimbus_core::error::PoiError;
use nimbus_math::ColumnVector;

/// Weight of the net outlink score against the vested balance.
const OUTLINK_FUSION_WEIGHT: f64 = 1.25;
/// Weight of the page-rank result against the balance/outlink blend.
const IMPORTANCE_FUSION_WEIGHT: f64 = 0.1337;

/// Read-only bundle of the four vectors the fusion step consumes.
#[derive(Clone, Copy, Debug)]
pub struct ScorerContext<'a> {
    /// The converged page-rank vector.
    pub importances: &'a ColumnVector,
    /// Net outlink scores (negative entries already dampened).
    pub outlink_scores: &'a ColumnVector,
    /// Vested balances in micro-coins.
    pub vested_balances: &'a ColumnVector,
    /// Per-account dampening from the clustering pass.
    pub graph_weights: &'a ColumnVector,
}

impl ScorerContext<'_> {
    fn check_dimensions(&self) -> Result<usize, PoiError> {
        let expected = self.importances.size();
        for (vector, name) in [
            (self.outlink_scores, "outlink score"),
            (self.vested_balances, "vested balance"),
            (self.graph_weights, "graph weight"),
        ] {
            if vector.size() != expected {
                return Err(PoiError::UnexpectedDimension {
                    vector: name,
                    expected,
                    actual: vector.size(),
                });
            }
        }
        Ok(expected)
    }
}

/// Turns the iteration result and the auxiliary vectors into the final
/// importance distribution.
pub trait ImportanceScorer {
    fn final_score(&self, context: &ScorerContext<'_>) -> Result<ColumnVector, PoiError>;
}

/// The protocol scorer.
///
/// Blends vested balance with the weighted outlink score (negative blend
/// entries get no credit), adds the weighted page-rank, dampens outliers
/// through the graph weights, and normalizes the result into a
/// distribution.
#[derive(Clone, Copy, Debug, Default)]
pub struct PoiScorer;

impl ImportanceScorer for PoiScorer {
    fn final_score(&self, context: &ScorerContext<'_>) -> Result<ColumnVector, PoiError> {
        context.check_dimensions()?;

        let mut weighted_outlinks = context
            .vested_balances
            .add_element_wise(&context.outlink_scores.multiply(OUTLINK_FUSION_WEIGHT))?;
        weighted_outlinks.remove_negatives();
        weighted_outlinks.normalize();

        let weighted_importances = context.importances.multiply(IMPORTANCE_FUSION_WEIGHT);
        let mut score = weighted_outlinks
            .add_element_wise(&weighted_importances)?
            .multiply_element_wise(context.graph_weights)?;
        score.normalize();
        Ok(score)
    }
}
