//! Adapters for Stake Execution.

pub mod sortition_verifier;

pub use sortition_verifier::InMemorySortitionVerifier;
