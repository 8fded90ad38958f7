//! # Transaction Admission Subsystem
//!
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Runs every incoming transaction through an ordered list of checks and
//! mutations before its messages execute: protocol guards, fee
//! collection, and conditional revenue sharing with contract developers.
//! Any stage may abort the chain; later stages then never run.
//!
//! ## Stage Order (fixed, load-bearing)
//!
//! | # | Stage | Rejects with |
//! |---|-------|--------------|
//! | 1 | `setup` | never fails |
//! | 2 | `commission` | `CommissionTooLow`, `UnauthorizedDecode` |
//! | 3 | `simulation-gas-cap` | never fails directly |
//! | 4 | `extension-options` | `InvalidTransaction` |
//! | 5 | `fee-sufficiency` | `InsufficientFee` (check mode only) |
//! | 6 | `basic-validity` | `InvalidTransaction` |
//! | 7 | `timeout-height` | `InvalidTransaction` |
//! | 8 | `memo` | `InvalidTransaction` |
//! | 9 | `tx-size` | `SizeLimitExceeded`, `GasLimitExceeded` |
//! | 10 | `fee-settlement` | `UnknownFeePayer`, `GrantNotAuthorized`, `InsufficientFunds` |
//! | 11-15 | signature checkpoints | surfaced from the crypto collaborator |
//! | 16 | `cross-chain` | surfaced from the packet collaborator |
//!
//! Cheap guards run before expensive checks, fee settlement precedes
//! signature verification, the sequence increment is the last account
//! mutation, and cross-chain verification runs last of all.
//!
//! ## Revenue Sharing
//!
//! When a transaction executes a contract whose developer registered a
//! withdrawer address, half of the fee (rounded in the withdrawer's
//! favor on odd amounts) is routed to that withdrawer. Only the first
//! executed contract participates. `SettlementMode` selects between the
//! historical network accounting and corrected accounting.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      OUTER LAYER                                │
//! │  adapters/ - In-memory ledger, revenue, grant, crypto adapters  │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  ports/inbound.rs  - AdmissionApi trait                         │
//! │  ports/outbound.rs - AccountDirectory, LedgerTransfer,          │
//! │                      FeeGrantAccess, RevenueRegistry,           │
//! │                      SignatureAuthority, CrossChainVerifier     │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  domain/pipeline.rs  - AdmissionPipeline, stage ordering        │
//! │  domain/stages.rs    - guard stages                             │
//! │  domain/fees.rs      - fee sufficiency and settlement           │
//! │  domain/inspector.rs - message classification, authz unwrap     │
//! │  domain/context.rs   - per-transaction context and gas meter    │
//! │  domain/errors.rs    - AdmissionError enum                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//!
//! One admission is strictly sequential across stages. Concurrent
//! admissions are the host's business: it must run each against an
//! isolated, branchable ledger view and discard the branch on rejection,
//! so a partially-admitted transaction never becomes visible.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod events;
pub mod ports;

pub use config::{AdmissionConfig, GasPrice, GasPriceSet, SettlementMode, SplitStrategy};
pub use domain::{
    AdmissionCollaborators, AdmissionContext, AdmissionError, AdmissionPipeline, AdmissionStage,
    ExecutionMode,
};
pub use events::{AdmissionEvent, FeeDeductedPayload};
pub use ports::AdmissionApi;
