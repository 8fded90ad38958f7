//! In-memory fee-grant table for tests and local runs.

use crate::ports::outbound::{FeeGrantAccess, GrantError};
use shared_types::{Address, CoinSet, Message};
use std::collections::HashMap;
use std::sync::RwLock;

/// A static allowance table keyed by (granter, grantee).
///
/// `use_grant` deducts from the stored allowance, so repeated use drains
/// it the way the real grant module would.
pub struct StaticGrantTable {
    allowances: RwLock<HashMap<(Address, Address), CoinSet>>,
}

impl StaticGrantTable {
    pub fn new() -> Self {
        Self {
            allowances: RwLock::new(HashMap::new()),
        }
    }

    /// Registers an allowance from `granter` to `grantee`.
    pub fn with_allowance(self, granter: Address, grantee: Address, allowance: CoinSet) -> Self {
        if let Ok(mut allowances) = self.allowances.write() {
            allowances.insert((granter, grantee), allowance);
        }
        self
    }
}

impl Default for StaticGrantTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FeeGrantAccess for StaticGrantTable {
    fn use_grant(
        &self,
        granter: &Address,
        grantee: &Address,
        fee: &CoinSet,
        _messages: &[Message],
    ) -> Result<(), GrantError> {
        let mut allowances = self
            .allowances
            .write()
            .map_err(|_| GrantError::NoAllowance)?;
        let key = (*granter, *grantee);
        let allowance = allowances.get(&key).ok_or(GrantError::NoAllowance)?;

        let remaining = allowance
            .checked_sub(fee)
            .map_err(|_| GrantError::SpendLimitExceeded)?;
        allowances.insert(key, remaining);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRANTER: Address = [0xBB; 20];
    const GRANTEE: Address = [0xAA; 20];

    #[test]
    fn test_grant_covers_fee_and_drains() {
        let table = StaticGrantTable::new().with_allowance(
            GRANTER,
            GRANTEE,
            CoinSet::new().with("ujuno", 150u64),
        );
        let fee = CoinSet::new().with("ujuno", 100u64);

        table.use_grant(&GRANTER, &GRANTEE, &fee, &[]).unwrap();
        // Second use exceeds the 50 remaining.
        assert_eq!(
            table.use_grant(&GRANTER, &GRANTEE, &fee, &[]),
            Err(GrantError::SpendLimitExceeded)
        );
    }

    #[test]
    fn test_missing_allowance() {
        let table = StaticGrantTable::new();
        let fee = CoinSet::new().with("ujuno", 1u64);
        assert_eq!(
            table.use_grant(&GRANTER, &GRANTEE, &fee, &[]),
            Err(GrantError::NoAllowance)
        );
    }
}
