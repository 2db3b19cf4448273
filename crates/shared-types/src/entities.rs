//! # Core Value Types
//!
//! Primitive types shared by the ledger sandbox and the stake executors.
//!
//! ## Type Decisions
//!
//! - `Amount = u64`: the smallest currency unit. Sums across the whole ledger
//!   are computed in `u128` so supply checks never overflow.
//! - `Height = u64`: block height. Height 0 doubles as "unset" for the
//!   validator height fields, since executed blocks start at height 1.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use sha3::{Digest, Keccak256};
use std::fmt;

/// Amount of currency in the smallest unit.
pub type Amount = u64;

/// Block height.
pub type Height = u64;

/// A 32-byte Keccak-256 hash.
pub type Hash = [u8; 32];

/// Keccak-256 of `data`.
pub fn keccak256(data: &[u8]) -> Hash {
    Keccak256::digest(data).into()
}

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte account or validator address.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The treasury address. No public key derives to it, so it can never
    /// bond or validate.
    pub const TREASURY: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_treasury(&self) -> bool {
        *self == Self::TREASURY
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}...{}", hex::encode(&self.0[..4]), hex::encode(&self.0[18..]))
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// PUBLIC KEY (48 bytes, BLS G1 sized)
// =============================================================================

/// Validator public key.
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(#[serde_as(as = "Bytes")] pub [u8; 48]);

impl PublicKey {
    pub const fn new(bytes: [u8; 48]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 48] {
        &self.0
    }

    /// Derives the address: last 20 bytes of Keccak-256 over the key.
    pub fn address(&self) -> Address {
        let digest = keccak256(&self.0);
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest[12..]);
        Address(bytes)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(0x{}..)", hex::encode(&self.0[..8]))
    }
}

// =============================================================================
// STAMP (4 bytes)
// =============================================================================

/// Anti-replay tag binding a transaction to a recent block.
///
/// A stamp is the first four bytes of the referenced block's hash.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Stamp(pub [u8; 4]);

impl Stamp {
    pub fn from_block_hash(hash: &Hash) -> Self {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&hash[..4]);
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Debug for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stamp({})", hex::encode(self.0))
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

// =============================================================================
// SORTITION PROOF (48 bytes)
// =============================================================================

/// Opaque verifiable-random-function proof carried by a sortition transaction.
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortitionProof(#[serde_as(as = "Bytes")] pub [u8; 48]);

impl SortitionProof {
    pub const fn new(bytes: [u8; 48]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 48] {
        &self.0
    }
}

impl fmt::Debug for SortitionProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SortitionProof(0x{}..)", hex::encode(&self.0[..8]))
    }
}
