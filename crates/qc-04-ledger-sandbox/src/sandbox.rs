//! # Ledger Sandbox
//!
//! Mutable, height-scoped overlay over a `LedgerSnapshot`.
//!
//! ## Contract
//!
//! - Reads never fail. Unknown addresses yield `None`, which callers treat
//!   as "not yet created".
//! - Writes replace the stored entity wholesale. There is no field merging.
//! - The power delta only grows, and only on successful Bond and Sortition.
//! - There is no undo log. A caller that wants to roll back drops the
//!   sandbox; a caller that wants to keep the result takes `into_delta()`
//!   and commits it through the store.
//!
//! Each sandbox owns its overlay. Two sandboxes opened on the same snapshot
//! (for example a lenient mempool check and a strict block execution) share
//! nothing mutable.

use crate::domain::{Account, Committee, LedgerSnapshot, ProtocolParams, Validator};
use shared_types::{Address, Amount, Height, PublicKey, Stamp};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Changes accumulated by one sandbox, ready to commit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SandboxDelta {
    /// Height the changes belong to.
    pub height: Height,
    pub accounts: BTreeMap<Address, Account>,
    pub validators: BTreeMap<Address, Validator>,
    pub power_delta: Amount,
    /// Validators that won sortition at `height`, ordered by number.
    pub joined: Vec<Validator>,
}

impl SandboxDelta {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.validators.is_empty()
    }
}

pub struct Sandbox {
    base: Arc<LedgerSnapshot>,
    height: Height,
    accounts: HashMap<Address, Account>,
    validators: HashMap<Address, Validator>,
    power_delta: Amount,
}

impl Sandbox {
    /// Opens a sandbox for the block after `base`.
    pub fn new(base: Arc<LedgerSnapshot>) -> Self {
        let height = base.height + 1;
        Self {
            base,
            height,
            accounts: HashMap::new(),
            validators: HashMap::new(),
            power_delta: 0,
        }
    }

    // === Accounts ===

    pub fn account(&self, address: &Address) -> Option<Account> {
        self.accounts
            .get(address)
            .or_else(|| self.base.accounts.get(address))
            .cloned()
    }

    /// A fresh zero-balance account. Not stored until `update_account`.
    pub fn make_new_account(&self, address: Address) -> Account {
        Account::new(address)
    }

    pub fn update_account(&mut self, account: Account) {
        self.accounts.insert(account.address, account);
    }

    // === Validators ===

    pub fn validator(&self, address: &Address) -> Option<Validator> {
        self.validators
            .get(address)
            .or_else(|| self.base.validators.get(address))
            .cloned()
    }

    /// A fresh zero-stake validator for `public_key`, numbered after every
    /// validator known to this sandbox. Not stored until `update_validator`.
    pub fn make_new_validator(&self, public_key: PublicKey) -> Validator {
        let created_here = self
            .validators
            .keys()
            .filter(|addr| !self.base.validators.contains_key(*addr))
            .count();
        let number = self.base.total_validators() + created_here;
        Validator::new(public_key, u32::try_from(number).unwrap_or(u32::MAX))
    }

    pub fn update_validator(&mut self, validator: Validator) {
        self.validators.insert(validator.address, validator);
    }

    /// Validators that won sortition at the current height, ordered by number.
    pub fn joined_validators(&self) -> Vec<Validator> {
        let mut joined: Vec<Validator> = self
            .validators
            .values()
            .filter(|v| v.last_joined_height == self.height)
            .cloned()
            .collect();
        joined.sort_by_key(|v| v.number);
        joined
    }

    pub fn is_joined_committee(&self, address: &Address) -> bool {
        self.validator(address)
            .is_some_and(|v| v.last_joined_height == self.height)
    }

    // === Chain context ===

    pub fn committee(&self) -> &Committee {
        &self.base.committee
    }

    pub fn current_height(&self) -> Height {
        self.height
    }

    pub fn params(&self) -> &ProtocolParams {
        &self.base.params
    }

    pub fn treasury_address(&self) -> Address {
        Address::TREASURY
    }

    /// Height of the recent block `stamp` refers to.
    pub fn recent_block_height(&self, stamp: &Stamp) -> Option<Height> {
        self.base.recent_stamps.get(stamp).copied()
    }

    // === Power accounting ===

    pub fn power_delta(&self) -> Amount {
        self.power_delta
    }

    pub fn update_power_delta(&mut self, added: Amount) {
        self.power_delta = self.power_delta.saturating_add(added);
    }

    // === Supply ===

    /// Sum of all balances and stakes as seen through the overlay.
    pub fn total_coins(&self) -> u128 {
        let overlay_accounts: u128 = self.accounts.values().map(|a| u128::from(a.balance)).sum();
        let base_accounts: u128 = self
            .base
            .accounts
            .iter()
            .filter(|(addr, _)| !self.accounts.contains_key(*addr))
            .map(|(_, a)| u128::from(a.balance))
            .sum();
        let overlay_stakes: u128 = self.validators.values().map(|v| u128::from(v.stake)).sum();
        let base_stakes: u128 = self
            .base
            .validators
            .iter()
            .filter(|(addr, _)| !self.validators.contains_key(*addr))
            .map(|(_, v)| u128::from(v.stake))
            .sum();
        overlay_accounts + base_accounts + overlay_stakes + base_stakes
    }

    pub fn is_modified(&self) -> bool {
        !self.accounts.is_empty() || !self.validators.is_empty()
    }

    /// Consumes the sandbox and returns its changes in address order.
    pub fn into_delta(self) -> SandboxDelta {
        let joined = self.joined_validators();
        SandboxDelta {
            height: self.height,
            accounts: self.accounts.into_iter().collect(),
            validators: self.validators.into_iter().collect(),
            power_delta: self.power_delta,
            joined,
        }
    }
}
