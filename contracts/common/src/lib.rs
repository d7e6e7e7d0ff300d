//! Staking Common Library
//!
//! Shared types, constants, and accounting utilities for the staking core.
//!
//! The core is a pure state machine: a pool custodies deposited value and
//! issues shares representing proportional claims, while a monotone
//! reward-per-share accumulator distributes emissions without rescanning
//! positions. Everything here is deterministic and free of host-runtime
//! concerns; custody, identity resolution and the clock are injected by
//! the transition-engine crate.
//!
//! This crate is `no_std` compatible when built with the `no_std` feature
//! enabled.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Re-export Vec for submodules based on feature
#[cfg(not(feature = "std"))]
pub use alloc::vec::Vec;
#[cfg(feature = "std")]
pub use std::vec::Vec;

pub mod constants;
pub mod errors;
pub mod events;
pub mod math;
pub mod rewards;
pub mod types;

// Re-exports for convenience
pub use constants::*;
pub use errors::*;
pub use events::*;
pub use math::*;
pub use rewards::*;
pub use types::*;
