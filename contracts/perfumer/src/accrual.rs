/// Fixed-point scaling factor.
///
/// `acc_cologne_per_share` values are multiplied by this constant before
/// storage to preserve sub-unit precision without floating-point
/// arithmetic. 10^12 gives 12 decimal places, more than sufficient for
/// token amounts at Stellar's 7 decimals.
pub const PRECISION: i128 = 1_000_000_000_000;

// ── Core accrual math ───────────────────────────────────────────────────────
//
// All helpers use checked arithmetic and return `None` on overflow; the
// contract surfaces that as an explicit error instead of wrapping.

/// Reward emitted to one pool over `eligible_blocks`:
///
/// ```text
/// pool_reward = eligible_blocks × reward_per_block × alloc_point / total_alloc_point
/// ```
///
/// A zero `total_alloc_point` means no pool carries weight, so nothing is
/// emitted anywhere.
pub fn pool_reward(
    eligible_blocks: u64,
    reward_per_block: i128,
    alloc_point: u32,
    total_alloc_point: u32,
) -> Option<i128> {
    if total_alloc_point == 0 {
        return Some(0);
    }
    (eligible_blocks as i128)
        .checked_mul(reward_per_block)?
        .checked_mul(alloc_point as i128)?
        .checked_div(total_alloc_point as i128)
}

/// Growth of the per-share accumulator for a given pool reward:
///
/// ```text
/// Δacc = pool_reward × PRECISION / total_staked
/// ```
///
/// With zero stake there is no one to accrue to; the caller advances the
/// pool's high-water mark instead of calling this.
pub fn acc_per_share_delta(pool_reward: i128, total_staked: i128) -> Option<i128> {
    if total_staked <= 0 {
        return Some(0);
    }
    pool_reward.checked_mul(PRECISION)?.checked_div(total_staked)
}

/// The accumulator value "priced in" for a stake of `amount`:
///
/// ```text
/// checkpoint = amount × acc_per_share / PRECISION
/// ```
///
/// Stored as the user's reward debt after every settlement.
pub fn checkpoint(amount: i128, acc_per_share: i128) -> Option<i128> {
    amount.checked_mul(acc_per_share)?.checked_div(PRECISION)
}

/// Reward owed to a user since their last settlement:
///
/// ```text
/// pending = amount × acc_per_share / PRECISION − reward_debt
/// ```
///
/// The subtraction isolates only the accumulation that happened since the
/// last checkpoint, so prior payouts are never double-counted.
pub fn pending(amount: i128, acc_per_share: i128, reward_debt: i128) -> Option<i128> {
    checkpoint(amount, acc_per_share)?.checked_sub(reward_debt)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure math, no Soroban environment dependency.
