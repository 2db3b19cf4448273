use crate::ports::SortitionVerifier;
use parking_lot::RwLock;
use qc_04_ledger_sandbox::Validator;
use shared_types::{Address, SortitionProof, Stamp};
use std::collections::HashMap;

/// Sortition verifier backed by a registry of accepted proofs.
///
/// A proof verifies only if it was registered for exactly the same
/// validator and stamp. Used for testing and local tooling.
#[derive(Default)]
pub struct InMemorySortitionVerifier {
    accepted: RwLock<HashMap<(Address, Stamp), SortitionProof>>,
}

impl InMemorySortitionVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `proof` valid for `address` at `stamp`, replacing any earlier
    /// registration for the pair.
    pub fn register(&self, address: Address, stamp: Stamp, proof: SortitionProof) {
        self.accepted.write().insert((address, stamp), proof);
    }

    pub fn revoke(&self, address: &Address, stamp: &Stamp) {
        self.accepted.write().remove(&(*address, *stamp));
    }

    pub fn len(&self) -> usize {
        self.accepted.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.read().is_empty()
    }
}

impl SortitionVerifier for InMemorySortitionVerifier {
    fn verify_proof(&self, stamp: &Stamp, proof: &SortitionProof, validator: &Validator) -> bool {
        self.accepted
            .read()
            .get(&(validator.address, *stamp))
            .is_some_and(|accepted| accepted == proof)
    }
}
