//! Deterministic ledger fixtures for executor tests and the integration
//! suite.
//!
//! Keys are derived from integer seeds, so every run builds the same
//! genesis: four funded accounts, a full four-seat committee, three bonded
//! validators outside it, and stamps for the blocks still inside the
//! transaction time-to-live.

use qc_04_ledger_sandbox::{
    GenesisBuilder, InMemoryLedgerStore, LedgerSnapshot, ProtocolParams, Sandbox,
};
use shared_types::{keccak256, Address, Amount, Hash, Height, PublicKey, SortitionProof, Stamp};
use std::sync::Arc;

pub const GENESIS_HEIGHT: Height = 100;
pub const ACCOUNT_BALANCE: Amount = 10_000_000;
pub const COMMITTEE_STAKE: Amount = 100_000;
pub const VALIDATOR_STAKE: Amount = 50_000;

const ACCOUNT_SEEDS: std::ops::Range<u64> = 100..104;
const COMMITTEE_SEEDS: std::ops::RangeInclusive<u64> = 1..=4;
const VALIDATOR_SEEDS: std::ops::RangeInclusive<u64> = 11..=13;
const FIRST_RANDOM_SEED: u64 = 1_000;

/// Small parameters so cooldowns and intervals are reachable in tests.
pub fn test_params() -> ProtocolParams {
    ProtocolParams {
        committee_size: 4,
        bond_interval: 10,
        unbond_interval: 20,
        transaction_to_live_interval: 50,
        sortition_interval: 5,
        fee_fraction_bps: 10,
        minimum_fee: 10,
        maximum_fee: 1_000,
        minimum_stake: 1_000,
        maximum_stake: 1_000_000,
    }
}

pub fn public_key(seed: u64) -> PublicKey {
    let head = keccak256(&seed.to_be_bytes());
    let tail = keccak256(&head);
    let mut bytes = [0u8; 48];
    bytes[..32].copy_from_slice(&head);
    bytes[32..].copy_from_slice(&tail[..16]);
    PublicKey::new(bytes)
}

pub fn proof(seed: u64) -> SortitionProof {
    let mut bytes = [0u8; 48];
    let seed = [b"proof".as_slice(), &seed.to_be_bytes()[..]].concat();
    bytes[..32].copy_from_slice(&keccak256(&seed));
    SortitionProof::new(bytes)
}

/// Hash of the block committed at `height` in test chains.
pub fn block_hash(height: Height) -> Hash {
    keccak256(&[b"block".as_slice(), &height.to_be_bytes()[..]].concat())
}

pub fn stamp_at(height: Height) -> Stamp {
    Stamp::from_block_hash(&block_hash(height))
}

pub struct TestData {
    pub snapshot: Arc<LedgerSnapshot>,
    pub accounts: Vec<Address>,
    pub committee_keys: Vec<PublicKey>,
    pub validator_keys: Vec<PublicKey>,
    next_seed: u64,
}

impl TestData {
    pub fn new() -> Self {
        Self::with_params(test_params())
    }

    pub fn with_params(params: ProtocolParams) -> Self {
        let accounts: Vec<Address> = ACCOUNT_SEEDS.map(|s| public_key(s).address()).collect();
        let committee_keys: Vec<PublicKey> = COMMITTEE_SEEDS.map(public_key).collect();
        let validator_keys: Vec<PublicKey> = VALIDATOR_SEEDS.map(public_key).collect();

        let oldest = GENESIS_HEIGHT
            .saturating_sub(params.transaction_to_live_interval)
            .max(1);
        let mut builder = GenesisBuilder::new(params).height(GENESIS_HEIGHT);
        for addr in &accounts {
            builder = builder.account(*addr, ACCOUNT_BALANCE);
        }
        for pk in &committee_keys {
            builder = builder.committee_member(*pk, COMMITTEE_STAKE);
        }
        for pk in &validator_keys {
            builder = builder.validator(*pk, VALIDATOR_STAKE);
        }
        for height in oldest..=GENESIS_HEIGHT {
            builder = builder.recent_block(block_hash(height), height);
        }

        let snapshot = builder.build().expect("test genesis is valid");
        Self {
            snapshot: Arc::new(snapshot),
            accounts,
            committee_keys,
            validator_keys,
            next_seed: FIRST_RANDOM_SEED,
        }
    }

    pub fn sandbox(&self) -> Sandbox {
        Sandbox::new(Arc::clone(&self.snapshot))
    }

    /// A store starting from this fixture's genesis.
    pub fn store(&self) -> InMemoryLedgerStore {
        InMemoryLedgerStore::new(LedgerSnapshot::clone(&self.snapshot))
    }

    /// Stamp of the last committed block.
    pub fn stamp(&self) -> Stamp {
        stamp_at(self.snapshot.height)
    }

    /// A key no genesis entity uses.
    pub fn random_key(&mut self) -> PublicKey {
        let pk = public_key(self.next_seed);
        self.next_seed += 1;
        pk
    }

    pub fn account_sequence(&self, sb: &Sandbox, address: &Address) -> u64 {
        sb.account(address).map_or(0, |acc| acc.sequence)
    }

    /// Asserts that balances and stakes in `sb` plus `fees` still add up to
    /// the genesis supply.
    pub fn check_total_coin(&self, sb: &Sandbox, fees: Amount) {
        assert_eq!(
            sb.total_coins() + u128::from(fees),
            self.snapshot.total_coins()
        );
    }
}

impl Default for TestData {
    fn default() -> Self {
        Self::new()
    }
}
