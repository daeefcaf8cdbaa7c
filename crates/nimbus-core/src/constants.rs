//! Protocol constants. All monetary values in micros (1 coin = 10^6 micros).

/// Number of micros per coin.
pub const MICROS_PER_COIN: u64 = 1_000_000;

/// Estimated number of blocks produced per day.
pub const ESTIMATED_BLOCKS_PER_DAY: u64 = 1_440;

/// Lookback window for outlink history (roughly one month of blocks).
///
/// Transfers older than this at the evaluation height contribute nothing
/// to the transition graph.
pub const OUTLINK_HISTORY_BLOCKS: u64 = 30 * ESTIMATED_BLOCKS_PER_DAY;

/// Per-day decay applied to outlink weights.
///
/// A transfer that is `d` full days old contributes
/// `amount * OUTLINK_DECAY_BASE^d` to its edge weight.
pub const OUTLINK_DECAY_BASE: f64 = 0.9;

/// Importance is recalculated once per grouped height.
pub const IMPORTANCE_GROUPING: u64 = 359;

/// Maximum number of power iterations before the solver gives up.
pub const DEFAULT_MAX_ITERATIONS: u32 = 3_000;

/// Base convergence epsilon for the power iteration.
///
/// The effective epsilon is this value divided by the account count, so
/// convergence tightness is independent of network size.
pub const DEFAULT_CONVERGENCE_EPSILON: f64 = 1.0e-3;

/// Maps a block height to the grouped height at which importances apply.
///
/// Grouped heights are the multiples of [`IMPORTANCE_GROUPING`] strictly
/// below the given height, with a floor of 1:
///
/// # Examples
///
/// ```
/// use nimbus_core::constants::grouped_height;
/// assert_eq!(grouped_height(1), 1);
/// assert_eq!(grouped_height(359), 1);
/// assert_eq!(grouped_height(360), 359);
/// assert_eq!(grouped_height(359 * 10), 359 * 9);
/// assert_eq!(grouped_height(359 * 10 + 1), 359 * 10);
/// ```
pub fn grouped_height(height: u64) -> u64 {
    let grouped = (height.saturating_sub(1) / IMPORTANCE_GROUPING) * IMPORTANCE_GROUPING;
    grouped.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn grouped_height_floor_is_one() {
        assert_eq!(grouped_height(0), 1);
        assert_eq!(grouped_height(1), 1);
        assert_eq!(grouped_height(2), 1);
        assert_eq!(grouped_height(IMPORTANCE_GROUPING), 1);
    }

    #[test]
    fn grouped_height_at_multiples() {
        // the grouped height of an exact multiple is the previous multiple
        for n in 2..10 {
            assert_eq!(
                grouped_height(IMPORTANCE_GROUPING * n),
                IMPORTANCE_GROUPING * (n - 1)
            );
        }
    }

    #[test]
    fn grouped_height_just_past_multiples() {
        for n in 1..10 {
            assert_eq!(
                grouped_height(IMPORTANCE_GROUPING * n + 1),
                IMPORTANCE_GROUPING * n
            );
        }
    }

    #[test]
    fn outlink_history_spans_a_month() {
        assert_eq!(OUTLINK_HISTORY_BLOCKS, 43_200);
    }

    #[test]
    fn decay_base_is_a_valid_rate() {
        assert!(OUTLINK_DECAY_BASE > 0.0 && OUTLINK_DECAY_BASE < 1.0);
    }

    proptest! {
        #[test]
        fn grouped_height_stays_behind_and_aligned(height in 1u64..u64::MAX / 2) {
            let grouped = grouped_height(height);
            prop_assert!(grouped >= 1);
            prop_assert!(grouped <= height);
            prop_assert!(grouped == 1 || grouped % IMPORTANCE_GROUPING == 0);
            if height > IMPORTANCE_GROUPING {
                // the gap to the grouped height is at most one full group
                prop_assert!(height - grouped <= IMPORTANCE_GROUPING);
            }
        }
    }
}
