//! Slashing Policy Hook
//!
//! Slashing logic proper is outside the core; this hook is the seam where
//! an embedding protocol can plug one in. A policy may withhold part of an
//! unstake payout; the withheld value is routed to the pool authority so
//! custodied value and share accounting stay consistent.

use staking_common::{Pool, StakePosition};

/// Pluggable slashing decision for unstake payouts.
pub trait SlashingPolicy {
    /// Value to withhold from `withdrawal`, in stake token base units.
    /// The engine clamps the result to the withdrawal amount.
    fn slash_amount(
        &self,
        pool: &Pool,
        position: &StakePosition,
        withdrawal: u64,
        now: u64,
    ) -> u64;
}

/// Default policy: nothing is ever slashed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSlashing;

impl SlashingPolicy for NoSlashing {
    fn slash_amount(&self, _: &Pool, _: &StakePosition, _: u64, _: u64) -> u64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_slashing_is_zero() {
        let pool = Pool::new([1u8; 32], [7u8; 32], [8u8; 32], 10, 1_000);
        let position = StakePosition::new([2u8; 32], pool.id, 1_000);

        assert_eq!(NoSlashing.slash_amount(&pool, &position, 1_000, 2_000), 0);
    }
}
