//! Ports for the ledger sandbox.

pub mod store;

pub use store::*;
