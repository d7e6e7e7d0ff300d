//! Protocol Events for the Staking Core
//!
//! One typed event per successful state transition. Events are collected
//! during execution and can be indexed off-chain for UIs, analytics, and
//! notifications.

use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::types::{Address, PoolId};

/// Event types for indexing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum EventType {
    PoolInitialized = 0x01,
    Staked = 0x02,
    Unstaked = 0x03,
    RewardsClaimed = 0x04,
    RewardRateUpdated = 0x05,
    PauseSet = 0x06,
    AuthorityTransferred = 0x07,
}

/// Main event enum containing all staking core events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum StakingEvent {
    /// Emitted when a pool is created
    PoolInitialized {
        pool: PoolId,
        authority: Address,
        reward_rate: u64,
        timestamp: u64,
    },

    /// Emitted when a deposit is staked
    Staked {
        pool: PoolId,
        owner: Address,
        amount: u64,
        shares_minted: u128,
        total_staked: u128,
        timestamp: u64,
    },

    /// Emitted when shares are burned and stake withdrawn
    Unstaked {
        pool: PoolId,
        owner: Address,
        shares_burned: u128,
        amount: u64,
        slashed: u64,
        timestamp: u64,
    },

    /// Emitted when pending rewards are paid out
    RewardsClaimed {
        pool: PoolId,
        owner: Address,
        amount: u64,
        timestamp: u64,
    },

    /// Emitted when the authority changes the emission rate
    RewardRateUpdated {
        pool: PoolId,
        old_rate: u64,
        new_rate: u64,
        timestamp: u64,
    },

    /// Emitted when the authority pauses or unpauses the pool
    PauseSet {
        pool: PoolId,
        paused: bool,
        by: Address,
        timestamp: u64,
    },

    /// Emitted when pool authority is rotated
    AuthorityTransferred {
        pool: PoolId,
        old_authority: Address,
        new_authority: Address,
        timestamp: u64,
    },
}

impl StakingEvent {
    /// Get the event type for filtering
    pub fn event_type(&self) -> EventType {
        match self {
            Self::PoolInitialized { .. } => EventType::PoolInitialized,
            Self::Staked { .. } => EventType::Staked,
            Self::Unstaked { .. } => EventType::Unstaked,
            Self::RewardsClaimed { .. } => EventType::RewardsClaimed,
            Self::RewardRateUpdated { .. } => EventType::RewardRateUpdated,
            Self::PauseSet { .. } => EventType::PauseSet,
            Self::AuthorityTransferred { .. } => EventType::AuthorityTransferred,
        }
    }

    /// Get the timestamp when the event occurred
    pub fn timestamp(&self) -> u64 {
        match self {
            Self::PoolInitialized { timestamp, .. } => *timestamp,
            Self::Staked { timestamp, .. } => *timestamp,
            Self::Unstaked { timestamp, .. } => *timestamp,
            Self::RewardsClaimed { timestamp, .. } => *timestamp,
            Self::RewardRateUpdated { timestamp, .. } => *timestamp,
            Self::PauseSet { timestamp, .. } => *timestamp,
            Self::AuthorityTransferred { timestamp, .. } => *timestamp,
        }
    }

    /// Serialize event to bytes for storage/transmission
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    /// Deserialize event from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        borsh::from_slice(bytes).ok()
    }
}

/// Event log for collecting multiple events during execution
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<StakingEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Emit an event (add to log)
    pub fn emit(&mut self, event: StakingEvent) {
        self.events.push(event);
    }

    /// Get all events
    pub fn events(&self) -> &[StakingEvent] {
        &self.events
    }

    /// Take ownership of all events
    pub fn into_events(self) -> Vec<StakingEvent> {
        self.events
    }

    /// Filter events by type
    pub fn filter_by_type(&self, event_type: EventType) -> Vec<&StakingEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Check if any events were emitted
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Get number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
