//! Custody Effects
//!
//! Successful operations report their token movements as
//! `TransferInstruction`s instead of touching balances directly; the
//! surrounding environment executes them through a `CustodyLedger`.
//! An operation's state change and its transfers stand or fall together:
//! ledger implementations must be transactional, and `apply_settled`
//! commits engine state only after settlement succeeds.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use staking_common::{Address, StakingError, StakingResult, TokenId};

/// Direction and purpose of a custody transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum TransferKind {
    /// Stake tokens move from the party into the pool vault
    StakeDeposit,
    /// Stake tokens move from the pool vault to the party
    StakeWithdrawal,
    /// Reward tokens are issued to the party; rewards are minted at
    /// payout time and never pass through the stake vault
    RewardPayout,
}

/// A single token movement to be executed by the custody collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct TransferInstruction {
    pub kind: TransferKind,
    pub token: TokenId,
    pub party: Address,
    pub amount: u64,
}

/// Token-custody collaborator interface.
///
/// `execute` must apply the instruction fully or fail without effect.
pub trait CustodyLedger {
    fn execute(&mut self, instruction: &TransferInstruction) -> StakingResult<()>;
}

// ============ In-Memory Ledger ============

/// Balance-map custody double for tests and local harnesses.
///
/// Tracks the pool vault per token plus free balances per (party, token).
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    custodied: BTreeMap<TokenId, u64>,
    balances: BTreeMap<(Address, TokenId), u64>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fund a party's free balance (test setup)
    pub fn credit(&mut self, party: Address, token: TokenId, amount: u64) {
        let balance = self.balances.entry((party, token)).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Free balance held by a party
    pub fn balance_of(&self, party: &Address, token: &TokenId) -> u64 {
        self.balances.get(&(*party, *token)).copied().unwrap_or(0)
    }

    /// Value currently custodied in the vault for a token
    pub fn custodied(&self, token: &TokenId) -> u64 {
        self.custodied.get(token).copied().unwrap_or(0)
    }
}

impl CustodyLedger for MemoryLedger {
    fn execute(&mut self, instruction: &TransferInstruction) -> StakingResult<()> {
        let TransferInstruction {
            kind,
            token,
            party,
            amount,
        } = instruction;

        match kind {
            TransferKind::StakeDeposit => {
                let balance = self.balance_of(party, token);
                let remaining = balance.checked_sub(*amount).ok_or(StakingError::Underflow)?;
                let vault = self
                    .custodied(token)
                    .checked_add(*amount)
                    .ok_or(StakingError::Overflow)?;

                self.balances.insert((*party, *token), remaining);
                self.custodied.insert(*token, vault);
            }
            TransferKind::StakeWithdrawal => {
                let vault = self
                    .custodied(token)
                    .checked_sub(*amount)
                    .ok_or(StakingError::Underflow)?;
                let balance = self
                    .balance_of(party, token)
                    .checked_add(*amount)
                    .ok_or(StakingError::Overflow)?;

                self.custodied.insert(*token, vault);
                self.balances.insert((*party, *token), balance);
            }
            TransferKind::RewardPayout => {
                let balance = self
                    .balance_of(party, token)
                    .checked_add(*amount)
                    .ok_or(StakingError::Overflow)?;
                self.balances.insert((*party, *token), balance);
            }
        }

        Ok(())
    }
}
