//! Core Types for the Staking Core
//!
//! The two ledger records of the system: the shared `Pool` and the
//! per-owner `StakePosition`, plus deterministic id derivation for both.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::constants::seeds;

/// Type alias for addresses (32-byte hash)
pub type Address = [u8; 32];

/// Type alias for token identifiers
pub type TokenId = [u8; 32];

/// Type alias for pool identifiers
pub type PoolId = [u8; 32];

/// Type alias for stake position identifiers
pub type PositionId = [u8; 32];

// ============ Pool ============

/// Shared ledger state for one staking instance.
///
/// `total_staked` tracks custodied value in the smallest token
/// denomination; `total_shares` is the sum of shares across all positions.
/// The two are zero together: shares exist iff value is custodied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Pool {
    /// Unique identifier, derived from the stake token
    pub id: PoolId,
    /// Identity permitted to configure the pool
    pub authority: Address,
    /// Token accepted for staking
    pub stake_token: TokenId,
    /// Token paid out as rewards
    pub reward_token: TokenId,
    /// Reward emission per second, in reward base units
    pub reward_rate: u64,
    /// Sum of deposited value across all positions
    pub total_staked: u128,
    /// Sum of shares issued across all positions
    pub total_shares: u128,
    /// Accrued-reward-per-share, fixed-point at `SCALING_FACTOR`
    pub reward_accumulator: u128,
    /// Timestamp of the last accrual application, seconds
    pub last_accrual_time: u64,
    /// While set, stake/unstake/claim are rejected
    pub paused: bool,
}

impl Pool {
    /// Creates a freshly initialized pool
    pub fn new(
        authority: Address,
        stake_token: TokenId,
        reward_token: TokenId,
        reward_rate: u64,
        now: u64,
    ) -> Self {
        Self {
            id: derive_pool_id(&stake_token),
            authority,
            stake_token,
            reward_token,
            reward_rate,
            total_staked: 0,
            total_shares: 0,
            reward_accumulator: 0,
            last_accrual_time: now,
            paused: false,
        }
    }

    /// Returns true if the pool has no outstanding shares
    pub fn is_empty(&self) -> bool {
        self.total_shares == 0
    }
}

// ============ Stake Position ============

/// Per-owner record of shares held and rewards owed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct StakePosition {
    /// Identity that exclusively controls withdrawal and claim
    pub owner: Address,
    /// The pool this position belongs to
    pub pool: PoolId,
    /// Proportional claim against the pool
    pub shares: u128,
    /// Accumulator value last synced into this position
    pub reward_debt: u128,
    /// Synced, claimable reward balance not yet transferred out
    pub pending_rewards: u128,
    /// Last time the owner changed this position
    pub last_stake_time: u64,
}

impl StakePosition {
    /// Creates an empty position for `owner` in `pool`
    pub fn new(owner: Address, pool: PoolId, now: u64) -> Self {
        Self {
            owner,
            pool,
            shares: 0,
            reward_debt: 0,
            pending_rewards: 0,
            last_stake_time: now,
        }
    }

    /// Deterministic id for this position
    pub fn id(&self) -> PositionId {
        derive_position_id(&self.pool, &self.owner)
    }

    /// Returns true once shares and pending rewards are both zero.
    ///
    /// A closed position may be garbage-collected or retained; the core
    /// treats both representations identically.
    pub fn is_closed(&self) -> bool {
        self.shares == 0 && self.pending_rewards == 0
    }
}

// ============ Id Derivation ============

/// Derive the deterministic pool id for a stake token
pub fn derive_pool_id(stake_token: &TokenId) -> PoolId {
    hash_seeds(&[seeds::POOL_SEED.as_bytes(), stake_token])
}

/// Derive the deterministic position id for an owner in a pool
pub fn derive_position_id(pool: &PoolId, owner: &Address) -> PositionId {
    hash_seeds(&[seeds::POSITION_SEED.as_bytes(), pool, owner])
}

fn hash_seeds(seeds: &[&[u8]]) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    let result = hasher.finalize();
    let mut id = [0u8; 32];
    id.copy_from_slice(&result);
    id
}

// ============ Tests ============
