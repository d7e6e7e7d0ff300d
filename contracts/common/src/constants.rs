//! Protocol Constants
//!
//! All magic numbers and configuration values for the staking core.
//! The reward scaling factor matches the precision commonly used by
//! reward-per-share staking programs.

/// Token Metadata
pub mod token {
    /// Decimal places of the reward token
    pub const DECIMALS: u8 = 9;
    /// One unit with decimals (1 token = 1_000_000_000 base units)
    pub const ONE: u64 = 1_000_000_000;
}

/// Reward accounting precision
pub mod precision {
    /// Fixed-point scale for the reward accumulator (1e12).
    ///
    /// `reward_accumulator` stores accrued-reward-per-share multiplied by
    /// this factor; conversions back to token amounts divide it out.
    pub const SCALING_FACTOR: u128 = 1_000_000_000_000;
}

/// Seeds for deterministic account-id derivation
pub mod seeds {
    /// Seed for pool ids, combined with the stake token id
    pub const POOL_SEED: &str = "POOL";

    /// Seed for position ids, combined with pool id and owner
    pub const POSITION_SEED: &str = "USER_STAKE";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaling_factor_precision() {
        // One full token per second per share must be representable
        // without truncation at the accumulator scale.
        assert_eq!(precision::SCALING_FACTOR % token::ONE as u128, 0);
    }
}
