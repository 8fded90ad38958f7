//! Permissive signature and cross-chain adapters.
//!
//! Stand-ins for the real cryptographic and packet-handling
//! collaborators, for tests and local single-node runs where the
//! pipeline's own behavior is under study.

use crate::domain::context::AdmissionContext;
use crate::domain::errors::AdmissionError;
use crate::ports::outbound::{CrossChainVerifier, SignatureAuthority};
use shared_types::Transaction;

/// Default gas charged per signer for verification.
const DEFAULT_GAS_PER_SIGNER: u64 = 1_000;

/// Accepts every signature and charges a flat per-signer gas cost.
#[derive(Debug, Clone, Copy)]
pub struct PermissiveSignatureAuthority {
    gas_per_signer: u64,
}

impl PermissiveSignatureAuthority {
    pub fn new() -> Self {
        Self {
            gas_per_signer: DEFAULT_GAS_PER_SIGNER,
        }
    }

    /// Overrides the per-signer verification gas cost.
    pub fn with_gas_per_signer(mut self, gas: u64) -> Self {
        self.gas_per_signer = gas;
        self
    }
}

impl Default for PermissiveSignatureAuthority {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureAuthority for PermissiveSignatureAuthority {
    fn ensure_public_keys(
        &self,
        _ctx: &AdmissionContext,
        _tx: &Transaction,
    ) -> Result<(), AdmissionError> {
        Ok(())
    }

    fn check_signer_count(
        &self,
        _ctx: &AdmissionContext,
        _tx: &Transaction,
    ) -> Result<(), AdmissionError> {
        Ok(())
    }

    fn verification_gas(&self, tx: &Transaction) -> Result<u64, AdmissionError> {
        Ok(self.gas_per_signer.saturating_mul(tx.signers.len() as u64))
    }

    fn verify(&self, _ctx: &AdmissionContext, _tx: &Transaction) -> Result<(), AdmissionError> {
        Ok(())
    }

    fn increment_sequences(&self, _tx: &Transaction) -> Result<(), AdmissionError> {
        Ok(())
    }
}

/// Cross-chain verifier that accepts every transaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCrossChainVerifier;

impl CrossChainVerifier for NoOpCrossChainVerifier {
    fn check(&self, _ctx: &AdmissionContext, _tx: &Transaction) -> Result<(), AdmissionError> {
        Ok(())
    }
}
