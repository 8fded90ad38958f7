//! In-memory revenue registry for tests and local runs.

use crate::ports::outbound::RevenueRegistry;
use shared_types::{Address, RevenueRecord};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory implementation of the revenue registry read model.
pub struct InMemoryRevenueRegistry {
    records: RwLock<HashMap<Address, RevenueRecord>>,
}

impl InMemoryRevenueRegistry {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a revenue record for a contract.
    pub fn with_record(
        self,
        contract: Address,
        deployer: Address,
        withdrawer: Option<Address>,
    ) -> Self {
        if let Ok(mut records) = self.records.write() {
            records.insert(
                contract,
                RevenueRecord {
                    contract,
                    deployer,
                    withdrawer,
                },
            );
        }
        self
    }
}

impl Default for InMemoryRevenueRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RevenueRegistry for InMemoryRevenueRegistry {
    fn revenue_record(&self, contract: &Address) -> Option<RevenueRecord> {
        self.records.read().ok()?.get(contract).cloned()
    }
}
