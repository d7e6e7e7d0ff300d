//! Error Types for the Staking Core
//!
//! Typed errors for every rejectable operation. All errors abort the whole
//! operation with zero observable state mutation; retry is the caller's
//! responsibility after correcting the input.

/// Result type alias for staking operations
pub type StakingResult<T> = Result<T, StakingError>;

/// Main error enum for all staking core errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakingError {
    // ============ Lifecycle Errors ============
    /// Initialize called on a pool that already exists
    AlreadyInitialized { pool: [u8; 32] },

    /// Operation submitted against an uninitialized pool
    PoolNotFound,

    /// No stake position exists for this owner
    PositionNotFound { owner: [u8; 32] },

    // ============ Amount Errors ============
    /// Invalid amount provided
    InvalidAmount { amount: u64, reason: AmountErrorReason },

    /// Unstake requests more shares than the position holds
    InsufficientShares { requested: u128, held: u128 },

    // ============ Authorization Errors ============
    /// Caller identity or pool/position pairing does not match
    AccountMismatch { expected: [u8; 32], actual: [u8; 32] },

    /// Invalid address (e.g., zero address)
    InvalidAddress { reason: &'static str },

    /// Credential could not be resolved to an identity
    InvalidSignature,

    // ============ State Errors ============
    /// Pool is paused
    Paused,

    // ============ Math Errors ============
    /// Arithmetic overflow occurred
    Overflow,

    /// Arithmetic underflow occurred
    Underflow,

    /// Division by zero
    DivisionByZero,
}

/// Reasons for amount-related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountErrorReason {
    /// Amount is zero when non-zero required
    Zero,
    /// Amount too small to mint a single share at the current exchange rate
    TooSmall,
}

impl StakingError {
    /// Returns a stable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyInitialized { .. } => "E001_ALREADY_INITIALIZED",
            Self::PoolNotFound => "E002_POOL_NOT_FOUND",
            Self::PositionNotFound { .. } => "E003_POSITION_NOT_FOUND",
            Self::InvalidAmount { .. } => "E010_INVALID_AMOUNT",
            Self::InsufficientShares { .. } => "E011_INSUFFICIENT_SHARES",
            Self::AccountMismatch { .. } => "E020_ACCOUNT_MISMATCH",
            Self::InvalidAddress { .. } => "E021_INVALID_ADDRESS",
            Self::InvalidSignature => "E022_INVALID_SIGNATURE",
            Self::Paused => "E030_PAUSED",
            Self::Overflow => "E080_OVERFLOW",
            Self::Underflow => "E081_UNDERFLOW",
            Self::DivisionByZero => "E082_DIV_ZERO",
        }
    }

    /// Returns true if the caller can fix the error and resubmit
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidAmount { .. } => true,  // Adjust the amount
            Self::InsufficientShares { .. } => true, // Burn fewer shares
            Self::Paused => true,                // Wait for unpause
            _ => false,
        }
    }
}
