//! Event payloads emitted during admission.

use serde::{Deserialize, Serialize};
use shared_types::{Address, CoinSet};
use uuid::Uuid;

/// Emitted once a transaction's fee has been settled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeDeductedPayload {
    /// Correlation id for downstream consumers.
    pub correlation_id: Uuid,
    /// The fee as declared by the transaction.
    pub fee: CoinSet,
    /// The account the deduction was resolved against (payer or granter).
    pub payer: Address,
}

/// Events recorded on the admission context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AdmissionEvent {
    /// Fee settled for an admitted transaction.
    FeeDeducted(FeeDeductedPayload),
}
