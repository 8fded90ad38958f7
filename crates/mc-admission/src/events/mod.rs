//! Events recorded by the admission pipeline.
//!
//! Stages append events to the admission context; the caller decides
//! whether and where to publish them after the pipeline returns.

pub mod payloads;

pub use payloads::{AdmissionEvent, FeeDeductedPayload};
