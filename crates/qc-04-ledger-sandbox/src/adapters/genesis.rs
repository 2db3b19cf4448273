//! Genesis builder
//!
//! Assembles the first `LedgerSnapshot` a store starts from.

use crate::domain::{
    Account, Committee, LedgerSnapshot, ProtocolParams, StoreError, Validator,
};
use shared_types::{keccak256, Address, Amount, Hash, Height, PublicKey, Stamp};
use std::collections::HashMap;

pub struct GenesisBuilder {
    height: Height,
    params: ProtocolParams,
    accounts: Vec<Account>,
    validators: Vec<Validator>,
    committee: Vec<Address>,
    blocks: Vec<(Hash, Height)>,
}

impl GenesisBuilder {
    pub fn new(params: ProtocolParams) -> Self {
        Self {
            height: 0,
            params,
            accounts: Vec::new(),
            validators: Vec::new(),
            committee: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Height the snapshot claims to be committed at. Defaults to 0.
    pub fn height(mut self, height: Height) -> Self {
        self.height = height;
        self
    }

    pub fn account(mut self, address: Address, balance: Amount) -> Self {
        self.accounts.push(Account::new(address).with_balance(balance));
        self
    }

    /// Registers a bonded validator outside the committee.
    pub fn validator(mut self, public_key: PublicKey, stake: Amount) -> Self {
        let number = u32::try_from(self.validators.len()).unwrap_or(u32::MAX);
        let mut val = Validator::new(public_key, number);
        val.stake = stake;
        self.validators.push(val);
        self
    }

    /// Registers a bonded validator and seats it in the committee.
    pub fn committee_member(self, public_key: PublicKey, stake: Amount) -> Self {
        let address = public_key.address();
        let mut builder = self.validator(public_key, stake);
        builder.committee.push(address);
        builder
    }

    /// Records a block whose stamp transactions may reference.
    pub fn recent_block(mut self, block_hash: Hash, height: Height) -> Self {
        self.blocks.push((block_hash, height));
        self
    }

    pub fn build(self) -> Result<LedgerSnapshot, StoreError> {
        self.params.validate()?;

        let mut accounts = HashMap::with_capacity(self.accounts.len());
        for acc in self.accounts {
            if accounts.insert(acc.address, acc).is_some() {
                return Err(StoreError::InvalidGenesis("duplicated account".into()));
            }
        }

        let mut validators = HashMap::with_capacity(self.validators.len());
        for val in self.validators {
            if val.address.is_treasury() {
                return Err(StoreError::InvalidGenesis(
                    "treasury address cannot validate".into(),
                ));
            }
            if validators.insert(val.address, val).is_some() {
                return Err(StoreError::InvalidGenesis("duplicated validator".into()));
            }
        }

        if self.committee.len() > self.params.committee_size {
            return Err(StoreError::InvalidGenesis(format!(
                "committee has {} members, limit is {}",
                self.committee.len(),
                self.params.committee_size
            )));
        }
        let members = self
            .committee
            .iter()
            .filter_map(|addr| validators.get(addr).cloned())
            .collect();

        let mut recent_stamps: HashMap<Stamp, Height> = self
            .blocks
            .iter()
            .map(|(hash, height)| (Stamp::from_block_hash(hash), *height))
            .collect();
        recent_stamps
            .entry(Stamp::from_block_hash(&genesis_hash(self.height)))
            .or_insert(self.height);

        Ok(LedgerSnapshot {
            height: self.height,
            accounts,
            validators,
            committee: Committee::new(members, 0),
            params: self.params,
            recent_stamps,
        })
    }
}

/// Hash standing in for the block at the genesis height.
pub fn genesis_hash(height: Height) -> Hash {
    let mut seed = b"genesis".to_vec();
    seed.extend_from_slice(&height.to_be_bytes());
    keccak256(&seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_seats_committee() {
        let pk = PublicKey::new([1; 48]);
        let snap = GenesisBuilder::new(ProtocolParams::default())
            .committee_member(pk, 10)
            .validator(PublicKey::new([2; 48]), 20)
            .build()
            .unwrap();

        assert_eq!(snap.committee.size(), 1);
        assert!(snap.committee.contains(&pk.address()));
        assert_eq!(snap.total_validators(), 2);
        assert_eq!(snap.total_coins(), 30);
    }

    #[test]
    fn test_genesis_stamp_is_recent() {
        let snap = GenesisBuilder::new(ProtocolParams::default())
            .height(5)
            .build()
            .unwrap();
        let stamp = Stamp::from_block_hash(&genesis_hash(5));
        assert_eq!(snap.recent_stamps.get(&stamp), Some(&5));
    }

    #[test]
    fn test_oversized_committee_rejected() {
        let params = ProtocolParams {
            committee_size: 1,
            ..Default::default()
        };
        let result = GenesisBuilder::new(params)
            .committee_member(PublicKey::new([1; 48]), 1)
            .committee_member(PublicKey::new([2; 48]), 1)
            .build();
        assert!(matches!(result, Err(StoreError::InvalidGenesis(_))));
    }

    #[test]
    fn test_duplicated_account_rejected() {
        let addr = Address::new([3; 20]);
        let result = GenesisBuilder::new(ProtocolParams::default())
            .account(addr, 1)
            .account(addr, 2)
            .build();
        assert!(matches!(result, Err(StoreError::InvalidGenesis(_))));
    }
}
