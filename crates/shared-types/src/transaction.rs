//! # Transaction Model
//!
//! Stake-related transactions as seen by the execution core. Wire encoding
//! and signatures are handled upstream; by the time a `Transaction` reaches
//! an executor its signer has already been authenticated.
//!
//! The payload is a closed set of five kinds. `PayloadKind` is the lookup key
//! the dispatcher uses to pick an executor.

use crate::entities::{keccak256, Address, Amount, Hash, PublicKey, SortitionProof, Stamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum memo size in bytes.
pub const MAX_MEMO_LENGTH: usize = 64;

/// Discriminant of a transaction payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PayloadKind {
    Transfer,
    Bond,
    Unbond,
    Withdraw,
    Sortition,
}

impl PayloadKind {
    pub const ALL: [PayloadKind; 5] = [
        PayloadKind::Transfer,
        PayloadKind::Bond,
        PayloadKind::Unbond,
        PayloadKind::Withdraw,
        PayloadKind::Sortition,
    ];

    fn tag(self) -> u8 {
        match self {
            PayloadKind::Transfer => 1,
            PayloadKind::Bond => 2,
            PayloadKind::Sortition => 3,
            PayloadKind::Unbond => 4,
            PayloadKind::Withdraw => 5,
        }
    }

    /// Unbond and Sortition carry no fee.
    pub fn is_fee_exempt(self) -> bool {
        matches!(self, PayloadKind::Unbond | PayloadKind::Sortition)
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayloadKind::Transfer => "transfer",
            PayloadKind::Bond => "bond",
            PayloadKind::Unbond => "unbond",
            PayloadKind::Withdraw => "withdraw",
            PayloadKind::Sortition => "sortition",
        };
        f.write_str(name)
    }
}

/// Move balance between two accounts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPayload {
    pub sender: Address,
    pub receiver: Address,
    pub amount: Amount,
}

/// Lock balance from `sender` as stake of validator `receiver`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondPayload {
    pub sender: Address,
    pub receiver: Address,
    /// Required when the validator is not yet known, forbidden afterwards.
    pub public_key: Option<PublicKey>,
    pub stake: Amount,
}

/// Start the unbonding cooldown of a validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnbondPayload {
    pub validator: Address,
}

/// Release unbonded stake of validator `from` into account `to`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawPayload {
    pub from: Address,
    pub to: Address,
    pub amount: Amount,
}

/// Claim a committee seat with a sortition proof.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortitionPayload {
    pub address: Address,
    pub proof: SortitionProof,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    Transfer(TransferPayload),
    Bond(BondPayload),
    Unbond(UnbondPayload),
    Withdraw(WithdrawPayload),
    Sortition(SortitionPayload),
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Transfer(_) => PayloadKind::Transfer,
            Payload::Bond(_) => PayloadKind::Bond,
            Payload::Unbond(_) => PayloadKind::Unbond,
            Payload::Withdraw(_) => PayloadKind::Withdraw,
            Payload::Sortition(_) => PayloadKind::Sortition,
        }
    }

    /// Address whose sequence guards this payload against replay.
    pub fn signer(&self) -> Address {
        match self {
            Payload::Transfer(p) => p.sender,
            Payload::Bond(p) => p.sender,
            Payload::Unbond(p) => p.validator,
            Payload::Withdraw(p) => p.from,
            Payload::Sortition(p) => p.address,
        }
    }

    /// Value the fee is computed from.
    pub fn amount(&self) -> Amount {
        match self {
            Payload::Transfer(p) => p.amount,
            Payload::Bond(p) => p.stake,
            Payload::Withdraw(p) => p.amount,
            Payload::Unbond(_) | Payload::Sortition(_) => 0,
        }
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.push(self.kind().tag());
        match self {
            Payload::Transfer(p) => {
                out.extend_from_slice(p.sender.as_bytes());
                out.extend_from_slice(p.receiver.as_bytes());
                out.extend_from_slice(&p.amount.to_be_bytes());
            }
            Payload::Bond(p) => {
                out.extend_from_slice(p.sender.as_bytes());
                out.extend_from_slice(p.receiver.as_bytes());
                match &p.public_key {
                    Some(pk) => {
                        out.push(1);
                        out.extend_from_slice(pk.as_bytes());
                    }
                    None => out.push(0),
                }
                out.extend_from_slice(&p.stake.to_be_bytes());
            }
            Payload::Unbond(p) => {
                out.extend_from_slice(p.validator.as_bytes());
            }
            Payload::Withdraw(p) => {
                out.extend_from_slice(p.from.as_bytes());
                out.extend_from_slice(p.to.as_bytes());
                out.extend_from_slice(&p.amount.to_be_bytes());
            }
            Payload::Sortition(p) => {
                out.extend_from_slice(p.address.as_bytes());
                out.extend_from_slice(p.proof.as_bytes());
            }
        }
    }
}

/// A stake-related transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Recent block this transaction is bound to.
    pub stamp: Stamp,
    /// Must equal the signer's current sequence + 1.
    pub sequence: u64,
    pub fee: Amount,
    pub memo: String,
    pub payload: Payload,
}

impl Transaction {
    pub fn new(stamp: Stamp, sequence: u64, payload: Payload, fee: Amount, memo: &str) -> Self {
        Self {
            stamp,
            sequence,
            fee,
            memo: memo.to_string(),
            payload,
        }
    }

    pub fn new_transfer(
        stamp: Stamp,
        sequence: u64,
        sender: Address,
        receiver: Address,
        amount: Amount,
        fee: Amount,
        memo: &str,
    ) -> Self {
        let payload = Payload::Transfer(TransferPayload {
            sender,
            receiver,
            amount,
        });
        Self::new(stamp, sequence, payload, fee, memo)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new_bond(
        stamp: Stamp,
        sequence: u64,
        sender: Address,
        receiver: Address,
        public_key: Option<PublicKey>,
        stake: Amount,
        fee: Amount,
        memo: &str,
    ) -> Self {
        let payload = Payload::Bond(BondPayload {
            sender,
            receiver,
            public_key,
            stake,
        });
        Self::new(stamp, sequence, payload, fee, memo)
    }

    pub fn new_unbond(stamp: Stamp, sequence: u64, validator: Address, memo: &str) -> Self {
        let payload = Payload::Unbond(UnbondPayload { validator });
        Self::new(stamp, sequence, payload, 0, memo)
    }

    pub fn new_withdraw(
        stamp: Stamp,
        sequence: u64,
        from: Address,
        to: Address,
        amount: Amount,
        fee: Amount,
        memo: &str,
    ) -> Self {
        let payload = Payload::Withdraw(WithdrawPayload { from, to, amount });
        Self::new(stamp, sequence, payload, fee, memo)
    }

    pub fn new_sortition(
        stamp: Stamp,
        sequence: u64,
        address: Address,
        proof: SortitionProof,
    ) -> Self {
        let payload = Payload::Sortition(SortitionPayload { address, proof });
        Self::new(stamp, sequence, payload, 0, "")
    }

    pub fn kind(&self) -> PayloadKind {
        self.payload.kind()
    }

    pub fn signer(&self) -> Address {
        self.payload.signer()
    }

    pub fn amount(&self) -> Amount {
        self.payload.amount()
    }

    /// Keccak-256 over the canonical field encoding.
    pub fn hash(&self) -> Hash {
        let mut buf = Vec::with_capacity(160);
        buf.extend_from_slice(self.stamp.as_bytes());
        buf.extend_from_slice(&self.sequence.to_be_bytes());
        buf.extend_from_slice(&self.fee.to_be_bytes());
        self.payload.encode_into(&mut buf);
        buf.extend_from_slice(&(self.memo.len() as u32).to_be_bytes());
        buf.extend_from_slice(self.memo.as_bytes());
        keccak256(&buf)
    }

    /// Short hex id for logs.
    pub fn id(&self) -> String {
        hex::encode(&self.hash()[..8])
    }
}
