//! Domain layer of the Admission subsystem.

pub mod context;
pub mod errors;
pub mod fees;
pub mod inspector;
pub mod pipeline;
pub mod stages;

pub use context::{AdmissionContext, ExecutionMode};
pub use errors::AdmissionError;
pub use fees::{FeeSettlementStage, FeeSufficiencyStage};
pub use pipeline::{AdmissionCollaborators, AdmissionPipeline, AdmissionStage};
