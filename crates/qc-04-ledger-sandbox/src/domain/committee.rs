//! # Committee
//!
//! Ordered set of active validators with round-robin proposer rotation.
//!
//! Executors only read the committee. It changes when a block is committed:
//! validators that won sortition at that height are seated, the members that
//! joined longest ago are evicted once the committee exceeds its size limit,
//! and the proposer moves past the round that produced the block.

use super::entities::Validator;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::collections::HashSet;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Committee {
    validators: Vec<Validator>,
    /// Index of the proposer for round 0 of the next block.
    proposer_index: usize,
}

impl Committee {
    pub fn new(validators: Vec<Validator>, proposer_index: usize) -> Self {
        let proposer_index = if validators.is_empty() {
            0
        } else {
            proposer_index % validators.len()
        };
        Self {
            validators,
            proposer_index,
        }
    }

    pub fn size(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.validators.iter().any(|v| v.address == *address)
    }

    pub fn get(&self, address: &Address) -> Option<&Validator> {
        self.validators.iter().find(|v| v.address == *address)
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Proposer for `round` of the next block.
    pub fn proposer(&self, round: u32) -> Option<&Validator> {
        if self.validators.is_empty() {
            return None;
        }
        let idx = (self.proposer_index + round as usize) % self.validators.len();
        self.validators.get(idx)
    }

    /// Sum of member voting power.
    pub fn total_power(&self) -> u128 {
        self.validators.iter().map(|v| u128::from(v.power())).sum()
    }

    /// Replaces the stored record of a member. Non-members are ignored.
    pub fn refresh(&mut self, updated: &Validator) {
        if let Some(slot) = self
            .validators
            .iter_mut()
            .find(|v| v.address == updated.address)
        {
            *slot = updated.clone();
        }
    }

    /// Seats `joined`, evicts the oldest-joined members beyond `max_size`
    /// and advances the proposer past `last_round`.
    pub fn update(&mut self, last_round: u32, joined: &[Validator], max_size: usize) {
        let mut next = if self.validators.is_empty() {
            0
        } else {
            (self.proposer_index + last_round as usize + 1) % self.validators.len()
        };

        for val in joined {
            match self.validators.iter().position(|v| v.address == val.address) {
                Some(pos) => self.validators[pos] = val.clone(),
                None => self.validators.push(val.clone()),
            }
        }

        let fresh: HashSet<Address> = joined.iter().map(|v| v.address).collect();
        while self.validators.len() > max_size {
            let oldest = self
                .validators
                .iter()
                .enumerate()
                .filter(|(_, v)| !fresh.contains(&v.address))
                .min_by_key(|(_, v)| (v.last_joined_height, v.number))
                .map(|(idx, _)| idx);

            let Some(idx) = oldest else { break };
            self.validators.remove(idx);
            if idx < next {
                next -= 1;
            }
        }

        self.proposer_index = if self.validators.is_empty() {
            0
        } else {
            next % self.validators.len()
        };
    }
}
