//! # Meridian-Chain Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-crate admission flows
//!     ├── admission_flows.rs   # Pipeline behavior end-to-end
//!     └── fee_settlement.rs    # Settlement accounting over a live ledger
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p mc-tests
//!
//! # By category
//! cargo test -p mc-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;
