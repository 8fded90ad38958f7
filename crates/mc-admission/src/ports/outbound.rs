//! Outbound (Driven) ports for the Admission subsystem.
//!
//! These traits define the external collaborators the pipeline depends
//! on. The pipeline never reaches past them: account and balance storage,
//! fee grants, revenue registration, cryptography, and cross-chain proof
//! verification all live behind these contracts.

use crate::domain::context::AdmissionContext;
use crate::domain::errors::AdmissionError;
use shared_types::{Account, Address, CoinSet, Message, RevenueRecord, Transaction};
use thiserror::Error;

/// Errors from ledger transfers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The source cannot cover the transfer; nothing moved.
    #[error("account {account} cannot cover {required}")]
    InsufficientFunds {
        /// Hex-encoded source account.
        account: String,
        /// The amount that could not be covered.
        required: String,
    },

    /// The named module account is not registered.
    #[error("unknown module account: {0}")]
    UnknownModule(String),

    /// A ledger lock was poisoned by a panicking writer.
    #[error("ledger lock poisoned")]
    LockPoisoned,
}

/// Errors from the fee-grant capability.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GrantError {
    /// No allowance exists for this granter/grantee pair.
    #[error("no fee allowance found")]
    NoAllowance,

    /// The allowance does not cover the requested fee.
    #[error("fee exceeds the remaining allowance")]
    SpendLimitExceeded,

    /// The allowance does not permit one of the transaction's messages.
    #[error("message not allowed by the fee allowance: {0}")]
    MessageNotAllowed(String),
}

/// Account lookup interface.
///
/// Backed by the account module's store; the pipeline only reads.
pub trait AccountDirectory: Send + Sync {
    /// Returns the account at `address`, if it exists.
    fn account(&self, address: &Address) -> Option<Account>;

    /// Returns the address of a named module account, if registered.
    fn module_address(&self, name: &str) -> Option<Address>;
}

/// Balance transfer interface.
///
/// Both directions are atomic: either the full coin set moves or none of
/// it does. Rollback of earlier transfers on a later admission failure is
/// the host ledger's branch-and-discard contract.
pub trait LedgerTransfer: Send + Sync {
    /// Moves coins from a user account into a module account.
    fn transfer_to_module(
        &self,
        from: &Address,
        module: &str,
        amount: &CoinSet,
    ) -> Result<(), LedgerError>;

    /// Moves coins from a module account to a user account.
    fn transfer_from_module(
        &self,
        module: &str,
        to: &Address,
        amount: &CoinSet,
    ) -> Result<(), LedgerError>;
}

/// Fee-grant usage interface.
pub trait FeeGrantAccess: Send + Sync {
    /// Consumes `fee` from the allowance `granter` gave `grantee`, for
    /// exactly these messages.
    fn use_grant(
        &self,
        granter: &Address,
        grantee: &Address,
        fee: &CoinSet,
        messages: &[Message],
    ) -> Result<(), GrantError>;
}

/// Read-only view of the revenue-sharing registry.
pub trait RevenueRegistry: Send + Sync {
    /// Returns the revenue record registered for a contract, if any.
    fn revenue_record(&self, contract: &Address) -> Option<RevenueRecord>;
}

/// Signature-related checkpoints, delegated to the crypto collaborator.
///
/// Each call is all-or-nothing; the pipeline invokes them in a fixed
/// order and aborts on the first failure.
pub trait SignatureAuthority: Send + Sync {
    /// Ensures every signer's public key is on record (or sets it from
    /// the transaction on first use).
    fn ensure_public_keys(
        &self,
        ctx: &AdmissionContext,
        tx: &Transaction,
    ) -> Result<(), AdmissionError>;

    /// Validates the number of signers against protocol limits.
    fn check_signer_count(
        &self,
        ctx: &AdmissionContext,
        tx: &Transaction,
    ) -> Result<(), AdmissionError>;

    /// Returns the gas cost of verifying this transaction's signatures.
    fn verification_gas(&self, tx: &Transaction) -> Result<u64, AdmissionError>;

    /// Verifies every signature against the canonical sign bytes.
    fn verify(&self, ctx: &AdmissionContext, tx: &Transaction) -> Result<(), AdmissionError>;

    /// Increments every signer's sequence number.
    fn increment_sequences(&self, tx: &Transaction) -> Result<(), AdmissionError>;
}

/// Cross-chain proof verification, delegated to the packet-handling
/// collaborator. Runs last in the pipeline.
pub trait CrossChainVerifier: Send + Sync {
    /// Validates any embedded cross-chain proofs.
    fn check(&self, ctx: &AdmissionContext, tx: &Transaction) -> Result<(), AdmissionError>;
}

/// Mock account directory for testing.
#[cfg(test)]
pub struct MockAccountDirectory {
    accounts: std::collections::HashMap<Address, Account>,
    modules: std::collections::HashMap<String, Address>,
}

#[cfg(test)]
impl MockAccountDirectory {
    pub fn new() -> Self {
        Self {
            accounts: std::collections::HashMap::new(),
            modules: std::collections::HashMap::new(),
        }
    }

    pub fn with_account(mut self, address: Address) -> Self {
        self.accounts.insert(address, Account::new(address));
        self
    }

    pub fn with_module(mut self, name: &str, address: Address) -> Self {
        self.modules.insert(name.to_string(), address);
        self
    }
}

#[cfg(test)]
impl AccountDirectory for MockAccountDirectory {
    fn account(&self, address: &Address) -> Option<Account> {
        self.accounts.get(address).cloned()
    }

    fn module_address(&self, name: &str) -> Option<Address> {
        self.modules.get(name).copied()
    }
}

/// Mock ledger that records transfers without balances.
#[cfg(test)]
pub struct RecordingLedger {
    pub to_module: std::sync::Mutex<Vec<(Address, String, CoinSet)>>,
    pub from_module: std::sync::Mutex<Vec<(String, Address, CoinSet)>>,
}

#[cfg(test)]
impl RecordingLedger {
    pub fn new() -> Self {
        Self {
            to_module: std::sync::Mutex::new(Vec::new()),
            from_module: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
impl LedgerTransfer for RecordingLedger {
    fn transfer_to_module(
        &self,
        from: &Address,
        module: &str,
        amount: &CoinSet,
    ) -> Result<(), LedgerError> {
        self.to_module
            .lock()
            .unwrap()
            .push((*from, module.to_string(), amount.clone()));
        Ok(())
    }

    fn transfer_from_module(
        &self,
        module: &str,
        to: &Address,
        amount: &CoinSet,
    ) -> Result<(), LedgerError> {
        self.from_module
            .lock()
            .unwrap()
            .push((module.to_string(), *to, amount.clone()));
        Ok(())
    }
}
