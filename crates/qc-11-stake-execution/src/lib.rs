//! # QC-11 Stake Execution - Validator Lifecycle Subsystem
//!
//! **Subsystem ID:** 11
//!
//! ## Purpose
//!
//! Validates and applies stake-changing transactions against a
//! `qc_04_ledger_sandbox::Sandbox`. Every node applying the same batch to
//! the same snapshot must reach the same state, so nothing in here reads
//! clocks, randomness or I/O.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Sequence replay protection | `executors/mod.rs` - `check_sequence()` |
//! | No partial mutation on rejection | `executors/mod.rs` - validate/apply split |
//! | Conservation of currency modulo fees | every executor's `validate()` |
//! | Treasury never validates | `executors/bond.rs` |
//! | Stake within `[minimum_stake, maximum_stake]` | `executors/bond.rs` |
//! | Unbonding cooldown | `domain/lifecycle.rs` - `cooldown_elapsed()` |
//!
//! ## Execution Modes
//!
//! | Mode | Caller | Committee races |
//! |------|--------|-----------------|
//! | `Strict` | Block execution | Rejected with `InvalidTx` |
//! | `Lenient` | Mempool admission | Tolerated |
//!
//! ## Outbound Dependencies
//!
//! | Subsystem | Trait | Purpose |
//! |-----------|-------|---------|
//! | 4 (Ledger Sandbox) | `Sandbox` | Read/write accounts and validators |
//! | Sortition | `SortitionVerifier` | Verify committee-entry proofs |
//!
//! ## Usage Example
//!
//! ```ignore
//! use qc_11_stake_execution::prelude::*;
//!
//! let mut service = ExecutionService::new(ExecutionMode::Strict, verifier);
//! let mut sandbox = Sandbox::new(store.snapshot()?);
//! let report = service.execute_batch(&block.transactions, &mut sandbox);
//! store.commit(BlockCommit { block_hash, round, delta: sandbox.into_delta() })?;
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod executors;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod testkit;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::InMemorySortitionVerifier;
    pub use crate::domain::{
        derive_state, state_of, ErrorKind, ExecutionError, ExecutionMode, ExecutionResult,
        LifecycleState,
    };
    pub use crate::executors::{
        BondExecutor, Executor, SortitionExecutor, StakeExecutor, TransferExecutor,
        UnbondExecutor, WithdrawExecutor,
    };
    pub use crate::ports::SortitionVerifier;
    pub use crate::service::{BatchReport, ExecutionService, TxOutcome};
    pub use qc_04_ledger_sandbox::{BlockCommit, LedgerStore, Sandbox};
}

// =============================================================================
// CONSTANTS
// =============================================================================

/// Subsystem identifier.
pub const SUBSYSTEM_ID: u8 = 11;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Stake Execution";
