//! # Error Types
//!
//! Defines error types for the shared domain entities.

use thiserror::Error;

/// Errors from coin-set arithmetic.
///
/// Coin amounts are non-negative by construction; these errors are how
/// the arithmetic refuses to produce a negative or overflowed amount.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoinError {
    /// Subtraction would drive a denomination below zero.
    #[error("insufficient {denom}: available {available}, required {required}")]
    Underflow {
        /// Denomination being subtracted.
        denom: String,
        /// Amount currently held.
        available: String,
        /// Amount requested.
        required: String,
    },

    /// Addition overflowed the 256-bit amount range.
    #[error("amount overflow for denomination {denom}")]
    Overflow { denom: String },

    /// A denomination failed format validation.
    #[error("invalid denomination: {denom}")]
    InvalidDenom { denom: String },
}

/// Errors from encoding or decoding messages and transactions.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The payload could not be decoded into a known message.
    #[error("malformed message payload: {0}")]
    Malformed(String),

    /// The value could not be encoded.
    #[error("encoding failed: {0}")]
    Encoding(String),
}

/// Errors from transaction self-consistency checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransactionError {
    /// A transaction must carry at least one message.
    #[error("transaction contains no messages")]
    EmptyMessages,

    /// A transaction must carry signer metadata.
    #[error("transaction contains no signers")]
    NoSigners,

    /// The declared fee failed coin validation.
    #[error("invalid fee: {0}")]
    InvalidFee(#[from] CoinError),
}
