//! # Core Domain Entities
//!
//! Defines the chain-wide entities shared across subsystems.
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `PublicKey`, `Signature`, `Account`
//! - **Staking**: `CommissionRate`
//! - **Revenue Sharing**: `RevenueRecord`

use serde::{Deserialize, Serialize};

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

/// A 32-byte hash (e.g., SHA-256).
pub type Hash = [u8; 32];

/// A 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// A 32-byte Ed25519 public key.
pub type PublicKey = [u8; 32];

/// A 20-byte account address.
pub type Address = [u8; 20];

/// An on-chain account as seen by the admission pipeline.
///
/// Balances are owned by the ledger, not the account record; the
/// pipeline only needs identity and replay-protection metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Account {
    /// The account address.
    pub address: Address,
    /// Sequence number (number of admitted transactions).
    pub sequence: u64,
    /// Public key, absent until the account first signs.
    pub public_key: Option<PublicKey>,
}

impl Account {
    /// Creates an account at sequence zero with no key on record.
    pub fn new(address: Address) -> Self {
        Self {
            address,
            sequence: 0,
            public_key: None,
        }
    }
}

/// A validator commission rate in basis points (1/100th of a percent).
///
/// Integer basis points keep commission comparisons exact; 500 basis
/// points is 5%.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default, Hash,
)]
pub struct CommissionRate(u32);

/// Basis points in 100%.
pub const BASIS_POINTS_DENOM: u32 = 10_000;

impl CommissionRate {
    /// Creates a rate from basis points (500 = 5%).
    pub const fn from_basis_points(bps: u32) -> Self {
        Self(bps)
    }

    /// Creates a rate from whole percent (5 = 5%).
    pub const fn from_percent(percent: u32) -> Self {
        Self(percent * 100)
    }

    /// Returns the rate in basis points.
    pub const fn basis_points(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CommissionRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

/// Revenue-sharing registration for a deployed contract.
///
/// Owned by the revenue registry module; the admission pipeline only
/// reads these records, never creates or mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueRecord {
    /// The contract this record applies to.
    pub contract: Address,
    /// The account that deployed the contract.
    pub deployer: Address,
    /// Where the contract's fee share is paid out, if registered.
    pub withdrawer: Option<Address>,
}

impl RevenueRecord {
    /// Returns the withdrawer address, if one is registered.
    pub fn withdrawer_address(&self) -> Option<Address> {
        self.withdrawer
    }
}
