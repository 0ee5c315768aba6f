//! Property-based tests for the fixed-point accrual math.
//!
//! Invariants tested:
//! - Pending reward is zero immediately after a checkpoint
//! - A pool's reward never exceeds the global emission for the range
//! - Distributing a reward across stakers never exceeds the reward
//! - The accumulator round-trip loses less than one unit per staker

use proptest::prelude::*;

use perfumer::accrual::{acc_per_share_delta, checkpoint, pending, pool_reward, PRECISION};

proptest! {
    /// Settling a position prices in the whole accumulator: pending must
    /// be exactly zero right afterwards.
    #[test]
    fn prop_pending_zero_after_checkpoint(
        amount in 0i128..1_000_000_000_000,
        acc in 0i128..1_000_000_000 * PRECISION,
    ) {
        let debt = checkpoint(amount, acc).unwrap();
        prop_assert_eq!(pending(amount, acc, debt), Some(0));
    }

    /// A pool with partial weight never receives more than the global
    /// emission, and the full weight receives exactly it.
    #[test]
    fn prop_pool_reward_bounded_by_emission(
        blocks in 0u64..1_000_000,
        rate in 0i128..1_000_000_000,
        alloc in 0u32..10_000,
        extra in 0u32..10_000,
    ) {
        let total = alloc + extra;
        let emission = blocks as i128 * rate;
        if total > 0 {
            let share = pool_reward(blocks, rate, alloc, total).unwrap();
            prop_assert!(share <= emission);
        }
        prop_assert_eq!(pool_reward(blocks, rate, total, total), Some(if total == 0 { 0 } else { emission }));
    }

    /// Two stakers splitting a pool can never claim more than the pool
    /// earned, and truncation costs each of them less than one unit.
    #[test]
    fn prop_distribution_conserves_reward(
        reward in 0i128..1_000_000_000_000,
        stake_a in 1i128..1_000_000_000,
        stake_b in 1i128..1_000_000_000,
    ) {
        let total = stake_a + stake_b;
        let delta = acc_per_share_delta(reward, total).unwrap();

        let share_a = checkpoint(stake_a, delta).unwrap();
        let share_b = checkpoint(stake_b, delta).unwrap();

        prop_assert!(share_a + share_b <= reward);
        // Truncation loss: strictly less than one unit per staker plus
        // the per-share scaling remainder.
        let exact_a = reward * stake_a / total;
        let exact_b = reward * stake_b / total;
        prop_assert!(exact_a - share_a <= 1 + reward / PRECISION);
        prop_assert!(exact_b - share_b <= 1 + reward / PRECISION);
    }

    /// The accumulator never moves for an empty pool.
    #[test]
    fn prop_no_accrual_without_stake(reward in 0i128..1_000_000_000_000) {
        prop_assert_eq!(acc_per_share_delta(reward, 0), Some(0));
    }
}
