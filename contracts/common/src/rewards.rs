//! Reward Accrual and Settlement
//!
//! The accumulator model: the pool carries a monotone running total of
//! accrued-reward-per-share, and each position remembers the accumulator
//! value it last synced (`reward_debt`). A position's newly earned reward
//! is `shares * (accumulator - reward_debt)`, without rescanning other
//! positions.
//!
//! `sync_pool` is folded into the prefix of every mutating operation, so
//! there is no background accrual process and no stale-reward race.

use crate::errors::StakingResult;
use crate::math::{accumulator_increment, pending_reward, safe_add};
use crate::types::{Pool, StakePosition};

/// Advances the pool's reward accumulator to `now`.
///
/// Always moves `last_accrual_time` forward, even while no shares exist;
/// emission over an empty pool is not distributable and is dropped.
/// Idempotent for repeated calls at the same timestamp.
pub fn sync_pool(pool: &mut Pool, now: u64) -> StakingResult<()> {
    if now <= pool.last_accrual_time {
        return Ok(());
    }

    let elapsed = now - pool.last_accrual_time;
    if pool.total_shares == 0 || pool.reward_rate == 0 {
        pool.last_accrual_time = now;
        return Ok(());
    }

    let increment = accumulator_increment(pool.reward_rate, elapsed, pool.total_shares)?;
    pool.reward_accumulator = safe_add(pool.reward_accumulator, increment)?;
    pool.last_accrual_time = now;

    Ok(())
}

/// Folds rewards accrued since the last sync into the position.
///
/// Must run before any change to the position's share count: the reward
/// owed for the elapsed interval is determined by the shares held during
/// it. Returns the newly settled amount.
pub fn settle_position(position: &mut StakePosition, pool: &Pool) -> StakingResult<u128> {
    let earned = pending_reward(
        position.shares,
        pool.reward_accumulator,
        position.reward_debt,
    )?;

    position.pending_rewards = safe_add(position.pending_rewards, earned)?;
    position.reward_debt = pool.reward_accumulator;

    Ok(earned)
}
