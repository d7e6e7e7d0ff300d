//! Staking Pool Transition Engine
//!
//! The five core operations of the staking pool (initialize, stake,
//! unstake, claim, and the accrual folded into each of them) plus the
//! authority-scoped configuration operations: reward rate, pause switch,
//! authority rotation.
//!
//! ## Execution model
//!
//! Each operation is a deterministic function over a `StakingContext`:
//! the current pool, the caller's position, the authenticated caller and
//! a clock reading go in; on success the context carries the new state,
//! the emitted events and the custody transfers to execute. Operations
//! stage their work on copies and write back only on success, so a
//! rejected operation leaves the context byte-identical.
//!
//! ## Collaborators
//!
//! Identity resolution (`guard::Authenticator`), token custody
//! (`custody::CustodyLedger`) and the clock are injected; the engine
//! itself never reaches outside the context. Serialized execution per
//! pool is the embedding environment's responsibility; contexts for
//! different pools are fully independent.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

pub mod custody;
pub mod guard;
pub mod policy;

use staking_common::{
    errors::AmountErrorReason,
    events::{EventLog, StakingEvent},
    math, rewards,
    types::{Address, Pool, StakePosition, TokenId},
    StakingError, StakingResult,
};

use custody::{CustodyLedger, TransferInstruction, TransferKind};
use policy::{NoSlashing, SlashingPolicy};

// ============ Actions ============

/// The operations accepted by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum StakingAction {
    /// Create the pool; fails if one already exists
    InitializePool {
        authority: Address,
        stake_token: TokenId,
        reward_token: TokenId,
        reward_rate: u64,
    },
    /// Deposit `amount` of the stake token and mint shares
    Stake { amount: u64 },
    /// Burn `shares` and withdraw the underlying value
    Unstake { shares: u128 },
    /// Pay out the caller's pending rewards
    Claim,
    /// Change the emission rate (authority only)
    SetRewardRate { reward_rate: u64 },
    /// Pause or unpause stake/unstake/claim (authority only)
    SetPaused { paused: bool },
    /// Rotate the pool authority (authority only)
    TransferAuthority { new_authority: Address },
}

// ============ Execution Context ============

/// Per-operation execution context.
///
/// The harness builds one per submitted operation: `pool` is the current
/// pool state (None while uninitialized), `position` the caller's stake
/// position if one exists, `caller` the identity resolved by the
/// authenticator and `now` the clock reading.
#[derive(Debug, Clone)]
pub struct StakingContext {
    pub pool: Option<Pool>,
    pub position: Option<StakePosition>,
    pub caller: Address,
    pub now: u64,
    pub events: EventLog,
    pub transfers: Vec<TransferInstruction>,
}

impl StakingContext {
    pub fn new(
        pool: Option<Pool>,
        position: Option<StakePosition>,
        caller: Address,
        now: u64,
    ) -> Self {
        Self {
            pool,
            position,
            caller,
            now,
            events: EventLog::new(),
            transfers: Vec::new(),
        }
    }
}

// ============ Entry Points ============

/// Apply an action with the default (no-op) slashing policy.
pub fn apply(ctx: &mut StakingContext, action: &StakingAction) -> StakingResult<()> {
    apply_with_policy(ctx, action, &NoSlashing)
}

/// Apply an action, consulting `policy` on unstake payouts.
pub fn apply_with_policy(
    ctx: &mut StakingContext,
    action: &StakingAction,
    policy: &dyn SlashingPolicy,
) -> StakingResult<()> {
    match action {
        StakingAction::InitializePool {
            authority,
            stake_token,
            reward_token,
            reward_rate,
        } => execute_initialize(ctx, *authority, *stake_token, *reward_token, *reward_rate),
        StakingAction::Stake { amount } => execute_stake(ctx, *amount),
        StakingAction::Unstake { shares } => execute_unstake(ctx, *shares, policy),
        StakingAction::Claim => execute_claim(ctx),
        StakingAction::SetRewardRate { reward_rate } => execute_set_reward_rate(ctx, *reward_rate),
        StakingAction::SetPaused { paused } => execute_set_paused(ctx, *paused),
        StakingAction::TransferAuthority { new_authority } => {
            execute_transfer_authority(ctx, *new_authority)
        }
    }
}

/// Apply an action and settle its custody transfers against `ledger`.
///
/// State is committed to `ctx` only when every transfer executes; a
/// settlement failure leaves both the context and (given a transactional
/// ledger) the custody side untouched.
pub fn apply_settled(
    ctx: &mut StakingContext,
    action: &StakingAction,
    ledger: &mut dyn CustodyLedger,
) -> StakingResult<()> {
    apply_settled_with_policy(ctx, action, ledger, &NoSlashing)
}

/// `apply_settled` with an explicit slashing policy.
pub fn apply_settled_with_policy(
    ctx: &mut StakingContext,
    action: &StakingAction,
    ledger: &mut dyn CustodyLedger,
    policy: &dyn SlashingPolicy,
) -> StakingResult<()> {
    let mut staged = ctx.clone();
    apply_with_policy(&mut staged, action, policy)?;

    for instruction in &staged.transfers[ctx.transfers.len()..] {
        ledger.execute(instruction)?;
    }

    *ctx = staged;
    Ok(())
}

// ============ Operations ============

fn execute_initialize(
    ctx: &mut StakingContext,
    authority: Address,
    stake_token: TokenId,
    reward_token: TokenId,
    reward_rate: u64,
) -> StakingResult<()> {
    if let Some(pool) = &ctx.pool {
        return Err(StakingError::AlreadyInitialized { pool: pool.id });
    }
    if authority == [0u8; 32] {
        return Err(StakingError::InvalidAddress {
            reason: "pool authority cannot be the zero address",
        });
    }

    let pool = Pool::new(authority, stake_token, reward_token, reward_rate, ctx.now);

    ctx.events.emit(StakingEvent::PoolInitialized {
        pool: pool.id,
        authority,
        reward_rate,
        timestamp: ctx.now,
    });
    ctx.pool = Some(pool);

    Ok(())
}

fn execute_stake(ctx: &mut StakingContext, amount: u64) -> StakingResult<()> {
    let mut pool = active_pool(ctx)?;

    if amount == 0 {
        return Err(StakingError::InvalidAmount {
            amount,
            reason: AmountErrorReason::Zero,
        });
    }

    let mut position = match &ctx.position {
        Some(existing) => {
            guard::require_binding(&pool, existing)?;
            guard::require_owner(existing, &ctx.caller)?;
            existing.clone()
        }
        None => StakePosition::new(ctx.caller, pool.id, ctx.now),
    };

    rewards::sync_pool(&mut pool, ctx.now)?;
    // Owed rewards are settled against the share count that earned them,
    // before the deposit changes it.
    rewards::settle_position(&mut position, &pool)?;

    let shares = math::shares_for_deposit(amount, pool.total_shares, pool.total_staked)?;
    if shares == 0 {
        return Err(StakingError::InvalidAmount {
            amount,
            reason: AmountErrorReason::TooSmall,
        });
    }

    pool.total_staked = math::safe_add(pool.total_staked, amount as u128)?;
    pool.total_shares = math::safe_add(pool.total_shares, shares)?;
    position.shares = math::safe_add(position.shares, shares)?;
    position.last_stake_time = ctx.now;

    ctx.transfers.push(TransferInstruction {
        kind: TransferKind::StakeDeposit,
        token: pool.stake_token,
        party: position.owner,
        amount,
    });
    ctx.events.emit(StakingEvent::Staked {
        pool: pool.id,
        owner: position.owner,
        amount,
        shares_minted: shares,
        total_staked: pool.total_staked,
        timestamp: ctx.now,
    });
    ctx.pool = Some(pool);
    ctx.position = Some(position);

    Ok(())
}

fn execute_unstake(
    ctx: &mut StakingContext,
    shares: u128,
    policy: &dyn SlashingPolicy,
) -> StakingResult<()> {
    let mut pool = active_pool(ctx)?;
    let mut position = ctx
        .position
        .clone()
        .ok_or(StakingError::PositionNotFound { owner: ctx.caller })?;

    guard::require_binding(&pool, &position)?;
    guard::require_owner(&position, &ctx.caller)?;

    if shares == 0 {
        return Err(StakingError::InvalidAmount {
            amount: 0,
            reason: AmountErrorReason::Zero,
        });
    }
    if shares > position.shares {
        return Err(StakingError::InsufficientShares {
            requested: shares,
            held: position.shares,
        });
    }

    rewards::sync_pool(&mut pool, ctx.now)?;
    rewards::settle_position(&mut position, &pool)?;

    let amount = math::amount_for_shares(shares, pool.total_staked, pool.total_shares)?;
    let slashed = policy
        .slash_amount(&pool, &position, amount, ctx.now)
        .min(amount);
    let payout = amount - slashed;

    pool.total_staked = math::safe_sub(pool.total_staked, amount as u128)?;
    pool.total_shares = math::safe_sub(pool.total_shares, shares)?;
    position.shares = math::safe_sub(position.shares, shares)?;
    position.last_stake_time = ctx.now;

    ctx.transfers.push(TransferInstruction {
        kind: TransferKind::StakeWithdrawal,
        token: pool.stake_token,
        party: position.owner,
        amount: payout,
    });
    if slashed > 0 {
        // Withheld value leaves custody too, routed to the authority.
        ctx.transfers.push(TransferInstruction {
            kind: TransferKind::StakeWithdrawal,
            token: pool.stake_token,
            party: pool.authority,
            amount: slashed,
        });
    }
    ctx.events.emit(StakingEvent::Unstaked {
        pool: pool.id,
        owner: position.owner,
        shares_burned: shares,
        amount: payout,
        slashed,
        timestamp: ctx.now,
    });
    ctx.pool = Some(pool);
    ctx.position = Some(position);

    Ok(())
}

fn execute_claim(ctx: &mut StakingContext) -> StakingResult<()> {
    let mut pool = active_pool(ctx)?;
    let mut position = ctx
        .position
        .clone()
        .ok_or(StakingError::PositionNotFound { owner: ctx.caller })?;

    guard::require_binding(&pool, &position)?;
    guard::require_owner(&position, &ctx.caller)?;

    rewards::sync_pool(&mut pool, ctx.now)?;
    rewards::settle_position(&mut position, &pool)?;

    let payout: u64 = position
        .pending_rewards
        .try_into()
        .map_err(|_| StakingError::Overflow)?;

    if payout == 0 {
        // Nothing claimable is not an error; the accrual still counts.
        ctx.pool = Some(pool);
        ctx.position = Some(position);
        return Ok(());
    }

    position.pending_rewards = 0;

    ctx.transfers.push(TransferInstruction {
        kind: TransferKind::RewardPayout,
        token: pool.reward_token,
        party: position.owner,
        amount: payout,
    });
    ctx.events.emit(StakingEvent::RewardsClaimed {
        pool: pool.id,
        owner: position.owner,
        amount: payout,
        timestamp: ctx.now,
    });
    ctx.pool = Some(pool);
    ctx.position = Some(position);

    Ok(())
}

fn execute_set_reward_rate(ctx: &mut StakingContext, reward_rate: u64) -> StakingResult<()> {
    // Configuration stays available while paused.
    let mut pool = ctx.pool.clone().ok_or(StakingError::PoolNotFound)?;
    guard::require_authority(&pool, &ctx.caller)?;

    // Close out emission under the old rate first.
    rewards::sync_pool(&mut pool, ctx.now)?;

    let old_rate = pool.reward_rate;
    pool.reward_rate = reward_rate;

    ctx.events.emit(StakingEvent::RewardRateUpdated {
        pool: pool.id,
        old_rate,
        new_rate: reward_rate,
        timestamp: ctx.now,
    });
    ctx.pool = Some(pool);

    Ok(())
}

fn execute_set_paused(ctx: &mut StakingContext, paused: bool) -> StakingResult<()> {
    let mut pool = ctx.pool.clone().ok_or(StakingError::PoolNotFound)?;
    guard::require_authority(&pool, &ctx.caller)?;

    pool.paused = paused;

    ctx.events.emit(StakingEvent::PauseSet {
        pool: pool.id,
        paused,
        by: ctx.caller,
        timestamp: ctx.now,
    });
    ctx.pool = Some(pool);

    Ok(())
}

fn execute_transfer_authority(ctx: &mut StakingContext, new_authority: Address) -> StakingResult<()> {
    let mut pool = ctx.pool.clone().ok_or(StakingError::PoolNotFound)?;
    guard::require_authority(&pool, &ctx.caller)?;

    if new_authority == [0u8; 32] {
        return Err(StakingError::InvalidAddress {
            reason: "cannot transfer authority to the zero address",
        });
    }

    let old_authority = pool.authority;
    pool.authority = new_authority;

    ctx.events.emit(StakingEvent::AuthorityTransferred {
        pool: pool.id,
        old_authority,
        new_authority,
        timestamp: ctx.now,
    });
    ctx.pool = Some(pool);

    Ok(())
}

// ============ Helpers ============

fn active_pool(ctx: &StakingContext) -> StakingResult<Pool> {
    let pool = ctx.pool.clone().ok_or(StakingError::PoolNotFound)?;
    if pool.paused {
        return Err(StakingError::Paused);
    }
    Ok(pool)
}

// ============ Tests ============
