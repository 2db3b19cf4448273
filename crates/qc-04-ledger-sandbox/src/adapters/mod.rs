//! Adapters for the ledger sandbox.

pub mod genesis;
pub mod memory_store;

pub use genesis::{genesis_hash, GenesisBuilder};
pub use memory_store::InMemoryLedgerStore;
