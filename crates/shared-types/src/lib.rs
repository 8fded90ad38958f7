//! # Shared Types Crate
//!
//! This crate contains the domain entities shared across Meridian-Chain
//! subsystems: addresses and accounts, coin-set arithmetic, messages, and
//! transactions.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Exact money math**: `CoinSet` amounts are non-negative by
//!   construction; arithmetic errors are typed, never silent wraparound.
//! - **Closed message set**: `Message` is a tagged enum with an explicit
//!   `Other` variant, so matches over message kinds stay total.

pub mod coins;
pub mod entities;
pub mod errors;
pub mod transaction;

pub use coins::{CoinSet, MAX_DENOM_LENGTH};
pub use entities::*;
pub use errors::{CodecError, CoinError, TransactionError};
pub use transaction::{Message, RawMessage, SignerInfo, Transaction};
