//! Per-transaction admission context.
//!
//! Created fresh by the host for every admission attempt and discarded
//! after the pipeline returns; nothing here is persisted.

use super::errors::AdmissionError;
use crate::config::GasPriceSet;
use crate::events::AdmissionEvent;

/// Whether this admission runs speculatively or during final execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Speculative admission (mempool check).
    Check,
    /// Final execution inside a block.
    Deliver,
}

/// Mutable scratch state for one admission attempt.
///
/// The gas meter starts disarmed; the context-setup stage arms it from
/// the transaction's declared limit.
#[derive(Debug, Clone)]
pub struct AdmissionContext {
    /// Check vs. deliver mode.
    pub mode: ExecutionMode,
    /// True while estimating gas for a client.
    pub simulate: bool,
    /// Current block height.
    pub block_height: u64,
    /// Snapshot of the node's minimum-gas-price policy.
    pub min_gas_prices: GasPriceSet,
    /// Events recorded by stages, in emission order.
    pub events: Vec<AdmissionEvent>,
    gas_limit: u64,
    gas_consumed: u64,
}

impl AdmissionContext {
    /// Creates a context with no gas limit armed, empty policy, and
    /// simulation off.
    pub fn new(mode: ExecutionMode, block_height: u64) -> Self {
        Self {
            mode,
            simulate: false,
            block_height,
            min_gas_prices: GasPriceSet::new(),
            events: Vec::new(),
            gas_limit: 0,
            gas_consumed: 0,
        }
    }

    /// Sets the minimum-gas-price policy snapshot.
    pub fn with_min_gas_prices(mut self, prices: GasPriceSet) -> Self {
        self.min_gas_prices = prices;
        self
    }

    /// Flags this admission as a simulation.
    pub fn simulating(mut self) -> Self {
        self.simulate = true;
        self
    }

    /// Returns true in speculative (mempool) mode.
    pub fn is_check(&self) -> bool {
        self.mode == ExecutionMode::Check
    }

    /// Arms the gas meter with a fresh limit.
    pub fn begin_gas(&mut self, limit: u64) {
        self.gas_limit = limit;
        self.gas_consumed = 0;
    }

    /// Lowers the armed gas limit to `cap` if it is currently higher.
    pub fn cap_gas(&mut self, cap: u64) {
        if self.gas_limit > cap {
            self.gas_limit = cap;
        }
    }

    /// Charges the gas meter.
    ///
    /// # Errors
    /// `GasLimitExceeded` once consumption passes the armed limit. The
    /// charge is still recorded, so the error reports the real total.
    pub fn consume_gas(&mut self, amount: u64, scope: &'static str) -> Result<(), AdmissionError> {
        self.gas_consumed = self.gas_consumed.saturating_add(amount);
        if self.gas_consumed > self.gas_limit {
            return Err(AdmissionError::GasLimitExceeded {
                consumed: self.gas_consumed,
                limit: self.gas_limit,
                scope,
            });
        }
        Ok(())
    }

    /// Gas consumed so far.
    pub fn gas_consumed(&self) -> u64 {
        self.gas_consumed
    }

    /// Gas limit currently armed.
    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    /// Records an event.
    pub fn push_event(&mut self, event: AdmissionEvent) {
        self.events.push(event);
    }
}
