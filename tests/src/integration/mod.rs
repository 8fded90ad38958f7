//! Integration flows for the admission pipeline.

pub mod admission_flows;
pub mod fee_settlement;
