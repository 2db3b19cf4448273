use crate::adapters::GenesisBuilder;
use crate::domain::{LedgerSnapshot, StoreError};
use crate::ports::{BlockCommit, LedgerStore};
use parking_lot::RwLock;
use shared_types::Stamp;
use std::sync::Arc;
use tracing::{debug, info};

/// In-memory implementation of `LedgerStore` for testing and local tooling.
///
/// Each commit builds a new snapshot and swaps it in, so snapshots already
/// handed out stay valid and unchanged.
pub struct InMemoryLedgerStore {
    state: RwLock<Arc<LedgerSnapshot>>,
}

impl InMemoryLedgerStore {
    pub fn new(genesis: LedgerSnapshot) -> Self {
        Self {
            state: RwLock::new(Arc::new(genesis)),
        }
    }

    pub fn from_genesis(builder: GenesisBuilder) -> Result<Self, StoreError> {
        Ok(Self::new(builder.build()?))
    }

    pub fn height(&self) -> u64 {
        self.state.read().height
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn snapshot(&self) -> Result<Arc<LedgerSnapshot>, StoreError> {
        Ok(Arc::clone(&self.state.read()))
    }

    fn commit(&self, commit: BlockCommit) -> Result<(), StoreError> {
        let mut state = self.state.write();
        let expected = state.height + 1;
        let BlockCommit {
            block_hash,
            round,
            delta,
        } = commit;

        if delta.height != expected {
            return Err(StoreError::HeightMismatch {
                expected,
                actual: delta.height,
            });
        }

        let mut next = LedgerSnapshot::clone(&state);
        let touched_accounts = delta.accounts.len();
        let touched_validators = delta.validators.len();

        for (addr, acc) in delta.accounts {
            next.accounts.insert(addr, acc);
        }
        for (addr, val) in delta.validators {
            next.committee.refresh(&val);
            next.validators.insert(addr, val);
        }
        let committee_size = next.params.committee_size;
        next.committee.update(round, &delta.joined, committee_size);

        next.height = delta.height;
        next.recent_stamps
            .insert(Stamp::from_block_hash(&block_hash), next.height);

        let window = next
            .params
            .transaction_to_live_interval
            .max(next.params.sortition_interval);
        let height = next.height;
        let before = next.recent_stamps.len();
        next.recent_stamps.retain(|_, h| *h + window >= height);
        debug!(
            pruned = before - next.recent_stamps.len(),
            "Pruned expired stamps"
        );

        info!(
            height = next.height,
            accounts = touched_accounts,
            validators = touched_validators,
            joined = delta.joined.len(),
            power_delta = delta.power_delta,
            committee_size = next.committee.size(),
            "Committed sandbox delta"
        );

        *state = Arc::new(next);
        Ok(())
    }
}
