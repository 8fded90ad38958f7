//! Ports for the Admission subsystem.
//!
//! - `inbound`: the driving API other subsystems call.
//! - `outbound`: the driven collaborator contracts this subsystem needs.

pub mod inbound;
pub mod outbound;

pub use inbound::AdmissionApi;
pub use outbound::{
    AccountDirectory, CrossChainVerifier, FeeGrantAccess, GrantError, LedgerError, LedgerTransfer,
    RevenueRegistry, SignatureAuthority,
};
