//! # Shared Types Crate
//!
//! Value types and the transaction model shared by the ledger sandbox
//! (subsystem 4) and stake execution (subsystem 11).
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Addresses, keys, stamps and transactions are
//!   defined once here and re-used by every subsystem.
//! - **Closed Payload Set**: `Payload` is an exhaustive enum, so adding a
//!   transaction kind is a compile error everywhere it is dispatched.

pub mod entities;
pub mod transaction;

pub use entities::*;
pub use transaction::*;
