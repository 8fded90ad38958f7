//! Admission subsystem configuration.
//!
//! Every protocol constant the pipeline enforces is an explicit
//! configuration value, threaded into the stages at construction time.

use serde::{Deserialize, Serialize};
use shared_types::{CoinSet, CommissionRate, U256};

/// Fixed-point scale for gas prices: `1_000_000` micro-units = 1.0.
pub const GAS_PRICE_SCALE: u128 = 1_000_000;

/// A per-unit-gas price for one denomination, in micro-units.
///
/// `micros_per_gas = 10_000` prices gas at 0.01 of the denomination's
/// base unit per gas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasPrice {
    /// Denomination the price is quoted in.
    pub denom: String,
    /// Price per unit gas, scaled by [`GAS_PRICE_SCALE`].
    pub micros_per_gas: u128,
}

/// A validator's minimum-gas-price policy across denominations.
///
/// Empty means the validator accepts any fee.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GasPriceSet(Vec<GasPrice>);

impl GasPriceSet {
    /// Creates an empty policy.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a price for a denomination, consuming and returning the set.
    pub fn with(mut self, denom: &str, micros_per_gas: u128) -> Self {
        self.0.push(GasPrice {
            denom: denom.to_string(),
            micros_per_gas,
        });
        self
    }

    /// Returns true if no minimum prices are configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Computes the fee required to cover `gas_limit` units of gas:
    /// `required[denom] = ceil(price[denom] * gas_limit)`.
    pub fn required_fee(&self, gas_limit: u64) -> CoinSet {
        self.0.iter().fold(CoinSet::new(), |set, price| {
            let scaled = U256::from(price.micros_per_gas) * U256::from(gas_limit);
            let scale = U256::from(GAS_PRICE_SCALE);
            let required = (scaled + scale - U256::from(1u8)) / scale;
            set.with(&price.denom, required)
        })
    }
}

/// How the fee settlement stage accounts for a revenue split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SettlementMode {
    /// Replicates the historical network behavior: the collector fronts
    /// the withdrawer's share and is reimbursed by the payer, so the
    /// payer's net debit is the fee minus the halved share. Kept for
    /// compatibility testing against the running network.
    #[default]
    Legacy,
    /// The payer is debited the full declared fee and the collector
    /// retains the halved share after paying out the withdrawer.
    Corrected,
}

/// Which executed contracts participate in the revenue split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplitStrategy {
    /// Only the first top-level contract execution in the transaction
    /// receives a share. Extension point for proportional splitting.
    #[default]
    FirstContractOnly,
}

/// Admission pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmissionConfig {
    /// Minimum validator commission rate accepted on-chain.
    pub min_commission_rate: CommissionRate,
    /// Maximum memo length in bytes.
    pub max_memo_length: usize,
    /// Maximum encoded transaction size in bytes.
    pub max_tx_bytes: u64,
    /// Gas charged per encoded transaction byte.
    pub tx_size_cost_per_byte: u64,
    /// Gas cap applied while simulating; `None` leaves the declared
    /// gas limit in force.
    pub simulation_gas_limit: Option<u64>,
    /// Module account that collects settled fees.
    pub fee_collector_module: String,
    /// Revenue split accounting mode.
    pub settlement_mode: SettlementMode,
    /// Revenue split participant selection.
    pub split_strategy: SplitStrategy,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            min_commission_rate: CommissionRate::from_percent(5),
            max_memo_length: 256,
            max_tx_bytes: 262_144,
            tx_size_cost_per_byte: 10,
            simulation_gas_limit: Some(30_000_000),
            fee_collector_module: "distribution".to_string(),
            settlement_mode: SettlementMode::default(),
            split_strategy: SplitStrategy::default(),
        }
    }
}

impl AdmissionConfig {
    /// Creates a config with tight limits for testing.
    pub fn for_testing() -> Self {
        Self {
            max_memo_length: 64,
            max_tx_bytes: 4_096,
            simulation_gas_limit: Some(1_000_000),
            ..Default::default()
        }
    }
}
