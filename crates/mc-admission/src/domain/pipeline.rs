//! Pipeline assembly and execution.
//!
//! The builder validates its collaborators once, at node boot, and fixes
//! the stage order. Admission is then a fold over the ordered stage list
//! that short-circuits on the first error; there is no hidden recursion
//! and no stage ever invokes another.

use super::context::AdmissionContext;
use super::errors::AdmissionError;
use super::fees::{FeeSettlementStage, FeeSufficiencyStage};
use super::stages::{
    BasicValidityStage, CommissionStage, CrossChainStage, ExtensionOptionsStage, MemoStage,
    PublicKeyStage, SequenceStage, SetupStage, SignatureGasStage, SignatureVerifyStage,
    SignerCountStage, SimulationGasCapStage, TimeoutHeightStage, TxSizeStage,
};
use crate::config::AdmissionConfig;
use crate::ports::inbound::AdmissionApi;
use crate::ports::outbound::{
    AccountDirectory, CrossChainVerifier, FeeGrantAccess, LedgerTransfer, RevenueRegistry,
    SignatureAuthority,
};
use async_trait::async_trait;
use shared_types::Transaction;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One unit in the ordered admission pipeline.
pub trait AdmissionStage: Send + Sync {
    /// Stable stage name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Runs the stage. An error aborts the remaining chain.
    fn check(&self, ctx: &mut AdmissionContext, tx: &Transaction) -> Result<(), AdmissionError>;
}

/// External collaborators wired into the pipeline at construction.
///
/// Account directory, ledger transfer, and signature authority are
/// mandatory; the rest degrade gracefully (no grants capability means
/// granted fees are refused, no revenue registry means no splits, no
/// cross-chain verifier means the stage is not installed).
#[derive(Default, Clone)]
pub struct AdmissionCollaborators {
    pub accounts: Option<Arc<dyn AccountDirectory>>,
    pub ledger: Option<Arc<dyn LedgerTransfer>>,
    pub signatures: Option<Arc<dyn SignatureAuthority>>,
    pub fee_grants: Option<Arc<dyn FeeGrantAccess>>,
    pub revenue: Option<Arc<dyn RevenueRegistry>>,
    pub cross_chain: Option<Arc<dyn CrossChainVerifier>>,
}

impl AdmissionCollaborators {
    /// Creates an empty collaborator set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the account directory.
    pub fn with_accounts(mut self, accounts: Arc<dyn AccountDirectory>) -> Self {
        self.accounts = Some(accounts);
        self
    }

    /// Sets the ledger transfer capability.
    pub fn with_ledger(mut self, ledger: Arc<dyn LedgerTransfer>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Sets the signature authority.
    pub fn with_signatures(mut self, signatures: Arc<dyn SignatureAuthority>) -> Self {
        self.signatures = Some(signatures);
        self
    }

    /// Sets the fee-grant capability.
    pub fn with_fee_grants(mut self, fee_grants: Arc<dyn FeeGrantAccess>) -> Self {
        self.fee_grants = Some(fee_grants);
        self
    }

    /// Sets the revenue registry.
    pub fn with_revenue(mut self, revenue: Arc<dyn RevenueRegistry>) -> Self {
        self.revenue = Some(revenue);
        self
    }

    /// Sets the cross-chain verifier.
    pub fn with_cross_chain(mut self, cross_chain: Arc<dyn CrossChainVerifier>) -> Self {
        self.cross_chain = Some(cross_chain);
        self
    }
}

/// The composed admission pipeline.
///
/// INVARIANT: the stage order fixed here is load-bearing. Guards that
/// are cheap run before expensive checks, fee settlement precedes the
/// signature checkpoints, the sequence increment is the last account
/// mutation, and cross-chain verification runs last of all.
pub struct AdmissionPipeline {
    stages: Vec<Box<dyn AdmissionStage>>,
}

impl AdmissionPipeline {
    /// Builds the pipeline, validating mandatory collaborators.
    ///
    /// # Errors
    /// `AdmissionError::Configuration` if the account directory, ledger
    /// transfer capability, or signature authority is missing. This is a
    /// node-boot failure, never a per-transaction one.
    pub fn new(
        config: AdmissionConfig,
        collaborators: AdmissionCollaborators,
    ) -> Result<Self, AdmissionError> {
        let accounts = collaborators.accounts.ok_or_else(|| {
            AdmissionError::Configuration("account directory is required".to_string())
        })?;
        let ledger = collaborators.ledger.ok_or_else(|| {
            AdmissionError::Configuration("ledger transfer capability is required".to_string())
        })?;
        let signatures = collaborators.signatures.ok_or_else(|| {
            AdmissionError::Configuration("signature authority is required".to_string())
        })?;

        let mut stages: Vec<Box<dyn AdmissionStage>> = vec![
            Box::new(SetupStage),
            Box::new(CommissionStage::new(config.min_commission_rate)),
            Box::new(SimulationGasCapStage::new(config.simulation_gas_limit)),
            Box::new(ExtensionOptionsStage),
            Box::new(FeeSufficiencyStage),
            Box::new(BasicValidityStage),
            Box::new(TimeoutHeightStage),
            Box::new(MemoStage::new(config.max_memo_length)),
            Box::new(TxSizeStage::new(
                config.max_tx_bytes,
                config.tx_size_cost_per_byte,
            )),
            Box::new(FeeSettlementStage::new(
                accounts,
                ledger,
                collaborators.fee_grants,
                collaborators.revenue,
                config.fee_collector_module,
                config.settlement_mode,
                config.split_strategy,
            )),
            Box::new(PublicKeyStage::new(signatures.clone())),
            Box::new(SignerCountStage::new(signatures.clone())),
            Box::new(SignatureGasStage::new(signatures.clone())),
            Box::new(SignatureVerifyStage::new(signatures.clone())),
            Box::new(SequenceStage::new(signatures)),
        ];

        if let Some(cross_chain) = collaborators.cross_chain {
            stages.push(Box::new(CrossChainStage::new(cross_chain)));
        }

        Ok(Self { stages })
    }

    /// Runs the transaction through every stage in order, aborting on
    /// the first failure. The context reflects the failing stage's
    /// partial progress either way.
    pub fn admit(
        &self,
        ctx: &mut AdmissionContext,
        tx: &Transaction,
    ) -> Result<(), AdmissionError> {
        for stage in &self.stages {
            if let Err(err) = stage.check(ctx, tx) {
                warn!(
                    stage = stage.name(),
                    error = %err,
                    gas_consumed = ctx.gas_consumed(),
                    "transaction rejected"
                );
                return Err(err);
            }
            debug!(stage = stage.name(), "stage passed");
        }

        info!(
            gas_consumed = ctx.gas_consumed(),
            events = ctx.events.len(),
            simulate = ctx.simulate,
            "transaction admitted"
        );
        Ok(())
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

#[async_trait]
impl AdmissionApi for AdmissionPipeline {
    async fn admit(
        &self,
        ctx: &mut AdmissionContext,
        tx: &Transaction,
    ) -> Result<(), AdmissionError> {
        AdmissionPipeline::admit(self, ctx, tx)
    }
}
