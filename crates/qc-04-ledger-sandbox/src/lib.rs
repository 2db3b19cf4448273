//! # qc-04-ledger-sandbox
//!
//! Ledger Sandbox subsystem for Quantum-Chain.
//!
//! ## Role in System
//!
//! - **Execution Overlay**: Executors read and write accounts and validators
//!   through a `Sandbox` scoped to the block being built
//! - **Commit Boundary**: A finished sandbox turns into a `SandboxDelta`,
//!   which a `LedgerStore` applies atomically for the next height
//! - **Committee Source**: Snapshots carry the committee and the protocol
//!   parameters the executors enforce
//!
//! ## Flow
//!
//! ```text
//! [LedgerStore] ──snapshot──→ [Sandbox] ←──read/write── [Stake Execution (11)]
//!       ↑                         │
//!       └────────commit(delta)────┘
//! ```
//!
//! ## Concurrency
//!
//! Snapshots are immutable and shared through `Arc`. A mempool check and a
//! block execution may each open their own sandbox on the same snapshot.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod sandbox;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
pub use sandbox::{Sandbox, SandboxDelta};
