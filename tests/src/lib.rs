//! # Quantum-Chain Test Suite
//!
//! Unified test crate for flows that cross subsystem boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs       # Sandbox ↔ executors ↔ store, block by block
//!     └── properties.rs  # proptest invariants of the executors
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p qc-tests
//! cargo test -p qc-tests integration::flows
//! ```

pub mod integration;
