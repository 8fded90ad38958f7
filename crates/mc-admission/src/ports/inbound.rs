//! # Inbound Port - AdmissionApi
//!
//! Primary driving port exposing transaction admission.
//!
//! The surrounding block/transaction-processing loop calls `admit` once
//! per transaction, in both speculative (mempool) mode and final
//! execution mode; the mode travels inside the context.

use crate::domain::context::AdmissionContext;
use crate::domain::errors::AdmissionError;
use async_trait::async_trait;
use shared_types::Transaction;

/// Primary API for the Admission subsystem.
///
/// # Contract
///
/// - The context is mutated in place and remains valid for diagnostics
///   even when admission fails.
/// - A returned error means no later stage ran; whether earlier stages'
///   ledger effects survive is governed by the host's branch-and-discard
///   snapshot around the call.
#[async_trait]
pub trait AdmissionApi: Send + Sync {
    /// Runs the transaction through the full ordered stage list.
    async fn admit(
        &self,
        ctx: &mut AdmissionContext,
        tx: &Transaction,
    ) -> Result<(), AdmissionError>;
}
