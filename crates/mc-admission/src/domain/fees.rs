//! Fee stages: sufficiency against the node's minimum-gas-price policy,
//! and deduction with the contract revenue split.

use super::context::AdmissionContext;
use super::errors::{display_address, AdmissionError};
use super::inspector::collect_executed_contracts;
use super::pipeline::AdmissionStage;
use crate::config::{SettlementMode, SplitStrategy};
use crate::events::{AdmissionEvent, FeeDeductedPayload};
use crate::ports::outbound::{
    AccountDirectory, FeeGrantAccess, LedgerTransfer, RevenueRegistry,
};
use shared_types::{Address, Transaction};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Rejects underpriced transactions from the mempool.
///
/// Applies only in check mode and outside simulation: the policy is a
/// local mempool filter, not consensus. A fee covering any single policy
/// denomination is sufficient.
pub struct FeeSufficiencyStage;

impl AdmissionStage for FeeSufficiencyStage {
    fn name(&self) -> &'static str {
        "fee-sufficiency"
    }

    fn check(&self, ctx: &mut AdmissionContext, tx: &Transaction) -> Result<(), AdmissionError> {
        if !ctx.is_check() || ctx.simulate || ctx.min_gas_prices.is_empty() {
            return Ok(());
        }

        let required = ctx.min_gas_prices.required_fee(tx.gas_limit);
        if !tx.fee.is_any_gte(&required) {
            return Err(AdmissionError::InsufficientFee {
                got: tx.fee.clone(),
                required,
            });
        }
        Ok(())
    }
}

/// Deducts the declared fee from the resolved payer and routes a share
/// to a registered contract withdrawer.
pub struct FeeSettlementStage {
    accounts: Arc<dyn AccountDirectory>,
    ledger: Arc<dyn LedgerTransfer>,
    fee_grants: Option<Arc<dyn FeeGrantAccess>>,
    revenue: Option<Arc<dyn RevenueRegistry>>,
    collector_module: String,
    settlement_mode: SettlementMode,
    split_strategy: SplitStrategy,
}

impl FeeSettlementStage {
    pub fn new(
        accounts: Arc<dyn AccountDirectory>,
        ledger: Arc<dyn LedgerTransfer>,
        fee_grants: Option<Arc<dyn FeeGrantAccess>>,
        revenue: Option<Arc<dyn RevenueRegistry>>,
        collector_module: String,
        settlement_mode: SettlementMode,
        split_strategy: SplitStrategy,
    ) -> Self {
        Self {
            accounts,
            ledger,
            fee_grants,
            revenue,
            collector_module,
            settlement_mode,
            split_strategy,
        }
    }

    /// Resolves which account the fee is deducted from, consuming the
    /// grant when a distinct granter is named.
    fn resolve_deduct_from(&self, tx: &Transaction) -> Result<Address, AdmissionError> {
        let granter = match tx.fee_granter {
            Some(granter) if granter != tx.fee_payer => granter,
            Some(same) => return Ok(same),
            None => return Ok(tx.fee_payer),
        };

        let grants = self.fee_grants.as_ref().ok_or_else(|| {
            AdmissionError::GrantNotAuthorized {
                granter: display_address(&granter),
                payer: display_address(&tx.fee_payer),
                reason: "fee grants are not enabled".to_string(),
            }
        })?;

        grants
            .use_grant(&granter, &tx.fee_payer, &tx.fee, &tx.messages)
            .map_err(|e| AdmissionError::GrantNotAuthorized {
                granter: display_address(&granter),
                payer: display_address(&tx.fee_payer),
                reason: e.to_string(),
            })?;

        Ok(granter)
    }

    /// Looks up the withdrawer for the split, honoring the strategy.
    fn split_withdrawer(&self, contracts: &[Address]) -> Option<Address> {
        let registry = self.revenue.as_ref()?;
        let contract = match self.split_strategy {
            SplitStrategy::FirstContractOnly => contracts.first()?,
        };
        registry
            .revenue_record(contract)
            .and_then(|record| record.withdrawer)
    }

    /// Moves the fee, splitting with a registered withdrawer when the
    /// transaction executed a contract.
    fn deduct(&self, payer: &Address, tx: &Transaction) -> Result<(), AdmissionError> {
        let fee = &tx.fee;
        fee.validate_denoms()?;

        let contracts = collect_executed_contracts(&tx.messages);
        let withdrawer = if contracts.is_empty() {
            None
        } else {
            self.split_withdrawer(&contracts)
        };

        let Some(withdrawer) = withdrawer else {
            // Ordinary path: the full fee goes to the collector.
            return self
                .ledger
                .transfer_to_module(payer, &self.collector_module, fee)
                .map_err(|e| AdmissionError::InsufficientFunds(e.to_string()));
        };

        // On odd amounts the withdrawer share is fee - floor(fee/2), so
        // the two legs always recombine to exactly the fee.
        let share = fee.checked_sub(&fee.halved())?;

        match self.settlement_mode {
            SettlementMode::Legacy => {
                self.ledger
                    .transfer_from_module(&self.collector_module, &withdrawer, &share)
                    .map_err(|e| AdmissionError::InsufficientFunds(e.to_string()))?;
                // The payer reimburses only what the collector fronted.
                self.ledger
                    .transfer_to_module(payer, &self.collector_module, &share)
                    .map_err(|e| AdmissionError::InsufficientFunds(e.to_string()))
            }
            SettlementMode::Corrected => {
                self.ledger
                    .transfer_to_module(payer, &self.collector_module, fee)
                    .map_err(|e| AdmissionError::InsufficientFunds(e.to_string()))?;
                self.ledger
                    .transfer_from_module(&self.collector_module, &withdrawer, &share)
                    .map_err(|e| AdmissionError::InsufficientFunds(e.to_string()))
            }
        }
    }
}

impl AdmissionStage for FeeSettlementStage {
    fn name(&self) -> &'static str {
        "fee-settlement"
    }

    fn check(&self, ctx: &mut AdmissionContext, tx: &Transaction) -> Result<(), AdmissionError> {
        if self
            .accounts
            .module_address(&self.collector_module)
            .is_none()
        {
            return Err(AdmissionError::Internal(format!(
                "fee collector module account ({}) has not been set",
                self.collector_module
            )));
        }

        let deduct_from = self.resolve_deduct_from(tx)?;

        if self.accounts.account(&deduct_from).is_none() {
            return Err(AdmissionError::UnknownFeePayer {
                payer: display_address(&deduct_from),
            });
        }

        if !tx.fee.is_zero() {
            self.deduct(&deduct_from, tx)?;
        }

        debug!(
            fee = %tx.fee,
            payer = %display_address(&deduct_from),
            mode = ?self.settlement_mode,
            "fee settled"
        );

        ctx.push_event(AdmissionEvent::FeeDeducted(FeeDeductedPayload {
            correlation_id: Uuid::new_v4(),
            fee: tx.fee.clone(),
            payer: deduct_from,
        }));

        Ok(())
    }
}
