//! Error types for Stake Execution
//!
//! Every rejection is an ordinary outcome. `ExecutionError` carries the
//! diagnostic context; callers branch on `ExecutionError::kind()`.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Height, PayloadKind, Stamp};
use std::fmt;
use thiserror::Error;

/// Closed set of rejection kinds surfaced to mempool and block execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidAddress,
    InvalidPublicKey,
    InvalidSequence,
    InsufficientFunds,
    InvalidHeight,
    InvalidTx,
    InvalidFee,
    InvalidProof,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidAddress => "invalid address",
            ErrorKind::InvalidPublicKey => "invalid public key",
            ErrorKind::InvalidSequence => "invalid sequence",
            ErrorKind::InsufficientFunds => "insufficient funds",
            ErrorKind::InvalidHeight => "invalid height",
            ErrorKind::InvalidTx => "invalid transaction",
            ErrorKind::InvalidFee => "invalid fee",
            ErrorKind::InvalidProof => "invalid proof",
        };
        f.write_str(name)
    }
}

/// All reasons a stake transaction can be rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ExecutionError {
    /// Signer account does not exist
    #[error("Unknown account: {address}")]
    UnknownAccount { address: Address },

    /// No validator record, or a record without stake
    #[error("Unknown validator: {address}")]
    UnknownValidator { address: Address },

    #[error("Treasury address cannot be a validator")]
    TreasuryReceiver,

    #[error("Public key required to create validator {address}")]
    PublicKeyRequired { address: Address },

    #[error("Public key already recorded for validator {address}")]
    PublicKeyNotAllowed { address: Address },

    #[error("Public key does not derive to {address}")]
    PublicKeyMismatch { address: Address },

    #[error("Invalid sequence: expected {expected}, got {actual}")]
    InvalidSequence { expected: u64, actual: u64 },

    #[error("Sequence exhausted at {current}")]
    SequenceExhausted { current: u64 },

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: Amount, available: Amount },

    #[error("Validator {address} has not unbonded")]
    NotUnbonded { address: Address },

    #[error("Validator {address} is already unbonding since height {since}")]
    AlreadyUnbonding { address: Address, since: Height },

    #[error(
        "Unbonding cooldown pending: unbonded at {unbonding_height}, current {current}, \
         interval {interval}"
    )]
    CooldownPending {
        unbonding_height: Height,
        current: Height,
        interval: Height,
    },

    #[error("Bond too recent: bonded at {last_bonding_height}, stamp height {stamp_height}")]
    BondTooRecent {
        last_bonding_height: Height,
        stamp_height: Height,
    },

    #[error("Duplicated sortition: joined at {last_joined_height}, stamp height {stamp_height}")]
    DuplicateSortition {
        last_joined_height: Height,
        stamp_height: Height,
    },

    #[error("Validator {address} is in the committee")]
    InCommittee { address: Address },

    #[error("Validator {address} joins the committee at the next height")]
    JoiningCommittee { address: Address },

    #[error("More than {limit} validators joining the committee")]
    CommitteeJoinLimit { limit: usize },

    #[error("Validator {address} has no stake")]
    NoStake { address: Address },

    #[error("Stake overflow: {stake} + {added}")]
    StakeOverflow { stake: Amount, added: Amount },

    #[error("Stake {stake} exceeds maximum {maximum}")]
    StakeAboveMaximum { stake: Amount, maximum: Amount },

    #[error("Stake {stake} below minimum {minimum}")]
    StakeBelowMinimum { stake: Amount, minimum: Amount },

    #[error("Balance overflow for {address}")]
    BalanceOverflow { address: Address },

    #[error("Memo too long: {length} > {max}")]
    MemoTooLong { length: usize, max: usize },

    #[error("Unknown stamp {stamp}")]
    UnknownStamp { stamp: Stamp },

    #[error("Expired stamp {stamp}: block {block_height}, current {current}")]
    ExpiredStamp {
        stamp: Stamp,
        block_height: Height,
        current: Height,
    },

    #[error("Wrong executor: expected {expected}, got {actual}")]
    WrongPayload {
        expected: PayloadKind,
        actual: PayloadKind,
    },

    #[error("Invalid fee: expected {expected}, got {actual}")]
    InvalidFee { expected: Amount, actual: Amount },

    #[error("Invalid sortition proof for {address}")]
    InvalidProof { address: Address },
}

impl ExecutionError {
    /// The rejection kind callers react to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExecutionError::UnknownAccount { .. } | ExecutionError::UnknownValidator { .. } => {
                ErrorKind::InvalidAddress
            }
            ExecutionError::TreasuryReceiver
            | ExecutionError::PublicKeyRequired { .. }
            | ExecutionError::PublicKeyNotAllowed { .. }
            | ExecutionError::PublicKeyMismatch { .. } => ErrorKind::InvalidPublicKey,
            ExecutionError::InvalidSequence { .. } | ExecutionError::SequenceExhausted { .. } => {
                ErrorKind::InvalidSequence
            }
            ExecutionError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            ExecutionError::NotUnbonded { .. }
            | ExecutionError::AlreadyUnbonding { .. }
            | ExecutionError::CooldownPending { .. }
            | ExecutionError::BondTooRecent { .. }
            | ExecutionError::DuplicateSortition { .. } => ErrorKind::InvalidHeight,
            ExecutionError::InCommittee { .. }
            | ExecutionError::JoiningCommittee { .. }
            | ExecutionError::CommitteeJoinLimit { .. }
            | ExecutionError::NoStake { .. }
            | ExecutionError::StakeOverflow { .. }
            | ExecutionError::StakeAboveMaximum { .. }
            | ExecutionError::StakeBelowMinimum { .. }
            | ExecutionError::BalanceOverflow { .. }
            | ExecutionError::MemoTooLong { .. }
            | ExecutionError::UnknownStamp { .. }
            | ExecutionError::ExpiredStamp { .. }
            | ExecutionError::WrongPayload { .. } => ErrorKind::InvalidTx,
            ExecutionError::InvalidFee { .. } => ErrorKind::InvalidFee,
            ExecutionError::InvalidProof { .. } => ErrorKind::InvalidProof,
        }
    }
}

pub type ExecutionResult<T> = Result<T, ExecutionError>;
