//! Adapters for the Admission subsystem.
//!
//! In-memory implementations of the outbound ports, used by the test
//! suites and by local single-node runs. Production deployments wire the
//! real account, ledger, grant, revenue, crypto, and cross-chain modules
//! into the same ports.

pub mod grants;
pub mod memory_ledger;
pub mod revenue;
pub mod signatures;

pub use grants::StaticGrantTable;
pub use memory_ledger::InMemoryLedger;
pub use revenue::InMemoryRevenueRegistry;
pub use signatures::{NoOpCrossChainVerifier, PermissiveSignatureAuthority};
