use crate::domain::{LedgerSnapshot, StoreError};
use crate::sandbox::SandboxDelta;
use shared_types::Hash;
use std::sync::Arc;

/// A block's worth of changes handed to the store.
#[derive(Clone, Debug)]
pub struct BlockCommit {
    /// Hash of the block the delta came from. Its stamp becomes valid for
    /// new transactions.
    pub block_hash: Hash,
    /// Consensus round in which the block was decided.
    pub round: u32,
    pub delta: SandboxDelta,
}

/// Ledger storage abstraction.
///
/// The store materialises a snapshot of the last committed height and
/// accepts the delta of the next one. Encoding and durability are up to the
/// implementation.
pub trait LedgerStore: Send + Sync {
    fn snapshot(&self) -> Result<Arc<LedgerSnapshot>, StoreError>;
    fn commit(&self, commit: BlockCommit) -> Result<(), StoreError>;
}
