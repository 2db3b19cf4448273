//! Ledger snapshot
//!
//! Immutable ledger state at a committed height, as materialised by a
//! `LedgerStore`. Sandboxes share a snapshot through `Arc` and never write
//! to it.

use super::{Account, Committee, ProtocolParams, Validator};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Height, Stamp};
use std::collections::HashMap;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Last committed height.
    pub height: Height,
    pub accounts: HashMap<Address, Account>,
    pub validators: HashMap<Address, Validator>,
    pub committee: Committee,
    pub params: ProtocolParams,
    /// Stamps of recent blocks and the height each block was committed at.
    pub recent_stamps: HashMap<Stamp, Height>,
}

impl LedgerSnapshot {
    pub fn total_validators(&self) -> usize {
        self.validators.len()
    }

    /// Sum of all balances and all stakes.
    pub fn total_coins(&self) -> u128 {
        let balances: u128 = self.accounts.values().map(|a| u128::from(a.balance)).sum();
        let stakes: u128 = self.validators.values().map(|v| u128::from(v.stake)).sum();
        balances + stakes
    }
}
