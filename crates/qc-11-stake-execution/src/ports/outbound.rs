//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the stake executors depend on but do not implement.

use qc_04_ledger_sandbox::Validator;
use shared_types::{SortitionProof, Stamp};

/// Verifies sortition proofs.
///
/// The proof scheme is opaque to execution: given the stamp the proof was
/// drawn against, the proof and the validator claiming it, an
/// implementation returns the same answer on every node.
pub trait SortitionVerifier: Send + Sync {
    fn verify_proof(&self, stamp: &Stamp, proof: &SortitionProof, validator: &Validator) -> bool;
}
