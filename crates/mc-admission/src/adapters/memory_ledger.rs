//! In-memory ledger for tests and local single-node runs.
//!
//! Implements the account directory and transfer ports over plain maps.
//! Each transfer debits and credits under one write lock, so the
//! atomic-or-failed contract holds: a failed debit leaves every balance
//! untouched.

use crate::ports::outbound::{AccountDirectory, LedgerError, LedgerTransfer};
use shared_types::{Account, Address, CoinSet};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory implementation of the ledger-facing ports.
pub struct InMemoryLedger {
    accounts: RwLock<HashMap<Address, Account>>,
    balances: RwLock<HashMap<Address, CoinSet>>,
    modules: RwLock<HashMap<String, Address>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            balances: RwLock::new(HashMap::new()),
            modules: RwLock::new(HashMap::new()),
        }
    }

    /// Registers an account with no balance.
    pub fn with_account(self, address: Address) -> Self {
        if let Ok(mut accounts) = self.accounts.write() {
            accounts.insert(address, Account::new(address));
        }
        self
    }

    /// Registers an account holding `balance`.
    pub fn with_funded_account(self, address: Address, balance: CoinSet) -> Self {
        if let Ok(mut accounts) = self.accounts.write() {
            accounts.insert(address, Account::new(address));
        }
        if let Ok(mut balances) = self.balances.write() {
            balances.insert(address, balance);
        }
        self
    }

    /// Registers a module account at `address`, optionally funded.
    pub fn with_module(self, name: &str, address: Address, balance: CoinSet) -> Self {
        if let Ok(mut modules) = self.modules.write() {
            modules.insert(name.to_string(), address);
        }
        if let Ok(mut balances) = self.balances.write() {
            balances.insert(address, balance);
        }
        self
    }

    /// Returns the balance held at an address.
    pub fn balance_of(&self, address: &Address) -> CoinSet {
        self.balances
            .read()
            .ok()
            .and_then(|balances| balances.get(address).cloned())
            .unwrap_or_default()
    }

    /// Returns the balance held by a named module account.
    pub fn module_balance(&self, name: &str) -> CoinSet {
        match self.resolve_module(name) {
            Ok(address) => self.balance_of(&address),
            Err(_) => CoinSet::new(),
        }
    }

    fn resolve_module(&self, name: &str) -> Result<Address, LedgerError> {
        self.modules
            .read()
            .map_err(|_| LedgerError::LockPoisoned)?
            .get(name)
            .copied()
            .ok_or_else(|| LedgerError::UnknownModule(name.to_string()))
    }

    /// Moves `amount` between two concrete addresses atomically.
    fn transfer(&self, from: &Address, to: &Address, amount: &CoinSet) -> Result<(), LedgerError> {
        let mut balances = self.balances.write().map_err(|_| LedgerError::LockPoisoned)?;

        let from_balance = balances.get(from).cloned().unwrap_or_default();
        let debited = from_balance
            .checked_sub(amount)
            .map_err(|_| LedgerError::InsufficientFunds {
                account: hex_address(from),
                required: amount.to_string(),
            })?;

        let to_balance = balances.get(to).cloned().unwrap_or_default();
        let credited = to_balance
            .checked_add(amount)
            .map_err(|_| LedgerError::InsufficientFunds {
                account: hex_address(to),
                required: amount.to_string(),
            })?;

        balances.insert(*from, debited);
        balances.insert(*to, credited);
        Ok(())
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

fn hex_address(address: &Address) -> String {
    address.iter().map(|b| format!("{:02x}", b)).collect()
}

impl AccountDirectory for InMemoryLedger {
    fn account(&self, address: &Address) -> Option<Account> {
        self.accounts.read().ok()?.get(address).cloned()
    }

    fn module_address(&self, name: &str) -> Option<Address> {
        self.modules.read().ok()?.get(name).copied()
    }
}

impl LedgerTransfer for InMemoryLedger {
    fn transfer_to_module(
        &self,
        from: &Address,
        module: &str,
        amount: &CoinSet,
    ) -> Result<(), LedgerError> {
        let module_address = self.resolve_module(module)?;
        self.transfer(from, &module_address, amount)
    }

    fn transfer_from_module(
        &self,
        module: &str,
        to: &Address,
        amount: &CoinSet,
    ) -> Result<(), LedgerError> {
        let module_address = self.resolve_module(module)?;
        self.transfer(&module_address, to, amount)
    }
}
