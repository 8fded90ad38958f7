//! Guard stages of the admission pipeline.
//!
//! Each stage is one independently testable unit conforming to
//! [`AdmissionStage`]. The fee stages live in [`super::fees`]; everything
//! else is here. Stage ordering is owned by the pipeline builder.

use super::context::AdmissionContext;
use super::errors::AdmissionError;
use super::inspector;
use super::pipeline::AdmissionStage;
use crate::ports::outbound::{CrossChainVerifier, SignatureAuthority};
use shared_types::{CommissionRate, Transaction};
use std::sync::Arc;

/// Arms the gas meter from the transaction's declared limit.
///
/// Always first; never fails.
pub struct SetupStage;

impl AdmissionStage for SetupStage {
    fn name(&self) -> &'static str {
        "setup"
    }

    fn check(&self, ctx: &mut AdmissionContext, tx: &Transaction) -> Result<(), AdmissionError> {
        ctx.begin_gas(tx.gas_limit);
        Ok(())
    }
}

/// Enforces the minimum validator commission across all messages,
/// including one level of authorization unwrapping.
pub struct CommissionStage {
    minimum: CommissionRate,
}

impl CommissionStage {
    pub fn new(minimum: CommissionRate) -> Self {
        Self { minimum }
    }
}

impl AdmissionStage for CommissionStage {
    fn name(&self) -> &'static str {
        "commission"
    }

    fn check(&self, _ctx: &mut AdmissionContext, tx: &Transaction) -> Result<(), AdmissionError> {
        inspector::validate_commissions(&tx.messages, self.minimum)
    }
}

/// Caps metered gas while simulating.
pub struct SimulationGasCapStage {
    limit: Option<u64>,
}

impl SimulationGasCapStage {
    pub fn new(limit: Option<u64>) -> Self {
        Self { limit }
    }
}

impl AdmissionStage for SimulationGasCapStage {
    fn name(&self) -> &'static str {
        "simulation-gas-cap"
    }

    fn check(&self, ctx: &mut AdmissionContext, _tx: &Transaction) -> Result<(), AdmissionError> {
        if ctx.simulate {
            if let Some(limit) = self.limit {
                ctx.cap_gas(limit);
            }
        }
        Ok(())
    }
}

/// Rejects transactions carrying extension options.
///
/// No extension option is recognized by this chain; their presence is a
/// structural error.
pub struct ExtensionOptionsStage;

impl AdmissionStage for ExtensionOptionsStage {
    fn name(&self) -> &'static str {
        "extension-options"
    }

    fn check(&self, _ctx: &mut AdmissionContext, tx: &Transaction) -> Result<(), AdmissionError> {
        if !tx.extension_options.is_empty() {
            return Err(AdmissionError::InvalidTransaction(
                "unknown extension options".to_string(),
            ));
        }
        Ok(())
    }
}

/// Delegates to the transaction's self-consistency checks.
pub struct BasicValidityStage;

impl AdmissionStage for BasicValidityStage {
    fn name(&self) -> &'static str {
        "basic-validity"
    }

    fn check(&self, _ctx: &mut AdmissionContext, tx: &Transaction) -> Result<(), AdmissionError> {
        tx.validate_basic()
            .map_err(|e| AdmissionError::InvalidTransaction(e.to_string()))
    }
}

/// Rejects transactions whose timeout height has passed.
pub struct TimeoutHeightStage;

impl AdmissionStage for TimeoutHeightStage {
    fn name(&self) -> &'static str {
        "timeout-height"
    }

    fn check(&self, ctx: &mut AdmissionContext, tx: &Transaction) -> Result<(), AdmissionError> {
        if tx.is_expired(ctx.block_height) {
            return Err(AdmissionError::InvalidTransaction(format!(
                "transaction expired: timeout height {} is below current height {}",
                tx.timeout_height, ctx.block_height
            )));
        }
        Ok(())
    }
}

/// Caps the memo length.
pub struct MemoStage {
    max_length: usize,
}

impl MemoStage {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl AdmissionStage for MemoStage {
    fn name(&self) -> &'static str {
        "memo"
    }

    fn check(&self, _ctx: &mut AdmissionContext, tx: &Transaction) -> Result<(), AdmissionError> {
        if tx.memo.len() > self.max_length {
            return Err(AdmissionError::InvalidTransaction(format!(
                "memo length {} exceeds limit {}",
                tx.memo.len(),
                self.max_length
            )));
        }
        Ok(())
    }
}

/// Caps the encoded transaction size and charges gas per byte.
pub struct TxSizeStage {
    max_bytes: u64,
    cost_per_byte: u64,
}

impl TxSizeStage {
    pub fn new(max_bytes: u64, cost_per_byte: u64) -> Self {
        Self {
            max_bytes,
            cost_per_byte,
        }
    }
}

impl AdmissionStage for TxSizeStage {
    fn name(&self) -> &'static str {
        "tx-size"
    }

    fn check(&self, ctx: &mut AdmissionContext, tx: &Transaction) -> Result<(), AdmissionError> {
        let size = tx
            .encoded_size()
            .map_err(|e| AdmissionError::Internal(e.to_string()))?;
        if size > self.max_bytes {
            return Err(AdmissionError::SizeLimitExceeded {
                size,
                max: self.max_bytes,
            });
        }
        ctx.consume_gas(size.saturating_mul(self.cost_per_byte), "tx size")
    }
}

/// Ensures every signer's public key is on record.
pub struct PublicKeyStage {
    authority: Arc<dyn SignatureAuthority>,
}

impl PublicKeyStage {
    pub fn new(authority: Arc<dyn SignatureAuthority>) -> Self {
        Self { authority }
    }
}

impl AdmissionStage for PublicKeyStage {
    fn name(&self) -> &'static str {
        "public-keys"
    }

    fn check(&self, ctx: &mut AdmissionContext, tx: &Transaction) -> Result<(), AdmissionError> {
        self.authority.ensure_public_keys(ctx, tx)
    }
}

/// Validates the signer count against protocol limits.
pub struct SignerCountStage {
    authority: Arc<dyn SignatureAuthority>,
}

impl SignerCountStage {
    pub fn new(authority: Arc<dyn SignatureAuthority>) -> Self {
        Self { authority }
    }
}

impl AdmissionStage for SignerCountStage {
    fn name(&self) -> &'static str {
        "signer-count"
    }

    fn check(&self, ctx: &mut AdmissionContext, tx: &Transaction) -> Result<(), AdmissionError> {
        self.authority.check_signer_count(ctx, tx)
    }
}

/// Charges the gas cost of signature verification.
pub struct SignatureGasStage {
    authority: Arc<dyn SignatureAuthority>,
}

impl SignatureGasStage {
    pub fn new(authority: Arc<dyn SignatureAuthority>) -> Self {
        Self { authority }
    }
}

impl AdmissionStage for SignatureGasStage {
    fn name(&self) -> &'static str {
        "signature-gas"
    }

    fn check(&self, ctx: &mut AdmissionContext, tx: &Transaction) -> Result<(), AdmissionError> {
        let gas = self.authority.verification_gas(tx)?;
        ctx.consume_gas(gas, "signature verification")
    }
}

/// Verifies every signature. Skipped while simulating: simulated
/// transactions are unsigned by construction.
pub struct SignatureVerifyStage {
    authority: Arc<dyn SignatureAuthority>,
}

impl SignatureVerifyStage {
    pub fn new(authority: Arc<dyn SignatureAuthority>) -> Self {
        Self { authority }
    }
}

impl AdmissionStage for SignatureVerifyStage {
    fn name(&self) -> &'static str {
        "signature-verify"
    }

    fn check(&self, ctx: &mut AdmissionContext, tx: &Transaction) -> Result<(), AdmissionError> {
        if ctx.simulate {
            return Ok(());
        }
        self.authority.verify(ctx, tx)
    }
}

/// Increments every signer's sequence number.
///
/// Must be the last state mutation before cross-chain verification.
pub struct SequenceStage {
    authority: Arc<dyn SignatureAuthority>,
}

impl SequenceStage {
    pub fn new(authority: Arc<dyn SignatureAuthority>) -> Self {
        Self { authority }
    }
}

impl AdmissionStage for SequenceStage {
    fn name(&self) -> &'static str {
        "sequence"
    }

    fn check(&self, _ctx: &mut AdmissionContext, tx: &Transaction) -> Result<(), AdmissionError> {
        self.authority.increment_sequences(tx)
    }
}

/// Validates embedded cross-chain proofs. Must run last.
pub struct CrossChainStage {
    verifier: Arc<dyn CrossChainVerifier>,
}

impl CrossChainStage {
    pub fn new(verifier: Arc<dyn CrossChainVerifier>) -> Self {
        Self { verifier }
    }
}

impl AdmissionStage for CrossChainStage {
    fn name(&self) -> &'static str {
        "cross-chain"
    }

    fn check(&self, ctx: &mut AdmissionContext, tx: &Transaction) -> Result<(), AdmissionError> {
        self.verifier.check(ctx, tx)
    }
}
