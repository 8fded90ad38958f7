//! # Domain Errors
//!
//! Error types for the Transaction Admission subsystem.
//!
//! The first stage to fail aborts the whole chain with one of these;
//! no stage catches or retries another stage's error.

use shared_types::{Address, CoinError, CoinSet, CommissionRate};
use thiserror::Error;

/// Formats an address as lowercase hex for error messages.
pub(crate) fn display_address(address: &Address) -> String {
    let mut out = String::with_capacity(address.len() * 2);
    for byte in address {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}

/// Admission error types.
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// A mandatory collaborator or setting is missing. Raised only at
    /// pipeline construction; fatal to node boot.
    #[error("admission pipeline misconfigured: {0}")]
    Configuration(String),

    /// Validator commission below the configured floor.
    #[error("commission {rate} is below the {minimum} minimum")]
    CommissionTooLow {
        /// Rate carried by the message.
        rate: CommissionRate,
        /// Configured floor.
        minimum: CommissionRate,
    },

    /// An authorization-wrapped inner message could not be decoded.
    #[error("cannot decode authorization-wrapped message: {0}")]
    UnauthorizedDecode(String),

    /// Declared fee does not meet the minimum-gas-price policy.
    #[error("insufficient fee; got: {got}, required: {required}")]
    InsufficientFee {
        /// Fee declared by the transaction.
        got: CoinSet,
        /// Fee required by the policy for the declared gas limit.
        required: CoinSet,
    },

    /// The account fees would be deducted from does not exist.
    #[error("fee payer address {payer} does not exist")]
    UnknownFeePayer {
        /// Hex-encoded payer address.
        payer: String,
    },

    /// The fee granter has not authorized this spend.
    #[error("{granter} is not allowed to pay fees for {payer}: {reason}")]
    GrantNotAuthorized {
        /// Hex-encoded granter address.
        granter: String,
        /// Hex-encoded payer address.
        payer: String,
        /// What the grant capability reported.
        reason: String,
    },

    /// A ledger transfer failed; nothing moved.
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),

    /// The gas meter ran past its limit.
    #[error("out of gas in {scope}: consumed {consumed}, limit {limit}")]
    GasLimitExceeded {
        /// Gas consumed including the failing charge.
        consumed: u64,
        /// Limit in force.
        limit: u64,
        /// Which stage charged the meter.
        scope: &'static str,
    },

    /// Encoded transaction exceeds the size cap.
    #[error("transaction size {size} exceeds limit {max}")]
    SizeLimitExceeded {
        /// Encoded size in bytes.
        size: u64,
        /// Configured cap.
        max: u64,
    },

    /// Transaction failed structural self-consistency checks.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Surfaced unchanged from the signature collaborator.
    #[error("signature check failed: {0}")]
    Signature(String),

    /// Surfaced unchanged from the cross-chain collaborator.
    #[error("cross-chain verification failed: {0}")]
    CrossChain(String),

    /// Coin arithmetic refused an operation.
    #[error(transparent)]
    Coins(#[from] CoinError),

    /// Invariant violation inside the pipeline itself.
    #[error("internal error: {0}")]
    Internal(String),
}
