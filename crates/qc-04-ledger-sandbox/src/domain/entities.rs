//! # Domain Entities for the Ledger Sandbox
//!
//! `Account` and `Validator` are plain records. The sandbox stores and
//! replaces them wholesale; all rule checking lives in the executors.
//!
//! ## Height Fields
//!
//! Validator heights use 0 for "never happened". Executed blocks start at
//! height 1, so a real event can never be recorded at height 0.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Height, PublicKey};

/// Account state.
///
/// `sequence` counts the transactions this account has signed. A
/// transaction is only valid with `sequence + 1`, which is what makes a
/// replayed transaction fail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
    /// Balance in the smallest currency unit.
    pub balance: Amount,
    pub sequence: u64,
}

impl Account {
    /// A fresh, empty account.
    pub fn new(address: Address) -> Self {
        Self {
            address,
            balance: 0,
            sequence: 0,
        }
    }

    /// Builder method to set the balance.
    pub fn with_balance(mut self, balance: Amount) -> Self {
        self.balance = balance;
        self
    }

    /// Builder method to set the sequence.
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }
}

/// Validator state.
///
/// Created by the first Bond to an address and never deleted. The lifecycle
/// phase is not stored; it is derived from `stake`, `unbonding_height`,
/// `last_joined_height` and committee membership on every check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub address: Address,
    pub public_key: PublicKey,
    /// Creation index. Gives validators a stable, deterministic order.
    pub number: u32,
    /// Replay guard for transactions signed by the validator key
    /// (unbond, withdraw, sortition).
    pub sequence: u64,
    pub stake: Amount,
    pub last_bonding_height: Height,
    /// Height at which the validator last entered the committee through
    /// sortition.
    pub last_joined_height: Height,
    /// Height of the unbond transaction, 0 if never unbonded.
    pub unbonding_height: Height,
}

impl Validator {
    /// A fresh zero-stake validator for `public_key`.
    pub fn new(public_key: PublicKey, number: u32) -> Self {
        Self {
            address: public_key.address(),
            public_key,
            number,
            sequence: 0,
            stake: 0,
            last_bonding_height: 0,
            last_joined_height: 0,
            unbonding_height: 0,
        }
    }

    pub fn has_unbonded(&self) -> bool {
        self.unbonding_height > 0
    }

    /// Voting power: the stake, or nothing once unbonding started.
    pub fn power(&self) -> Amount {
        if self.has_unbonded() {
            0
        } else {
            self.stake
        }
    }
}
