//! # Stake Transaction Executors
//!
//! One executor per `PayloadKind`. Each is split in two:
//!
//! - `validate` reads the sandbox and computes the complete post-state of
//!   every entity the transaction touches. It is the only step that fails.
//! - `apply` writes that post-state back. It cannot fail, so a rejected
//!   transaction never leaves a partial mutation behind.
//!
//! `Executor` is the object-safe face the dispatcher works with.

pub mod bond;
pub mod sortition;
pub mod transfer;
pub mod unbond;
pub mod withdraw;

pub use bond::BondExecutor;
pub use sortition::SortitionExecutor;
pub use transfer::TransferExecutor;
pub use unbond::UnbondExecutor;
pub use withdraw::WithdrawExecutor;

use crate::domain::{ExecutionError, ExecutionResult};
use qc_04_ledger_sandbox::{Account, Sandbox, Validator};
use shared_types::{Address, Amount, PayloadKind, Transaction};

/// Validate-then-apply contract of a single executor.
pub trait StakeExecutor {
    /// Post-state computed by `validate`.
    type Plan;

    fn validate(&self, trx: &Transaction, sb: &Sandbox) -> ExecutionResult<Self::Plan>;

    fn apply(&mut self, plan: Self::Plan, sb: &mut Sandbox);

    /// Fee collected by the last applied transaction.
    fn collected_fee(&self) -> Amount;
}

/// Object-safe executor interface used by the dispatcher.
pub trait Executor: Send {
    /// Validates `trx` and, on success, applies it to `sb`.
    fn execute(&mut self, trx: &Transaction, sb: &mut Sandbox) -> ExecutionResult<()>;

    /// Validates `trx` without touching `sb`.
    fn check(&self, trx: &Transaction, sb: &Sandbox) -> ExecutionResult<()>;

    /// Fee collected by the last executed transaction.
    fn fee(&self) -> Amount;
}

impl<T> Executor for T
where
    T: StakeExecutor + Send,
{
    fn execute(&mut self, trx: &Transaction, sb: &mut Sandbox) -> ExecutionResult<()> {
        let plan = self.validate(trx, sb)?;
        self.apply(plan, sb);
        Ok(())
    }

    fn check(&self, trx: &Transaction, sb: &Sandbox) -> ExecutionResult<()> {
        self.validate(trx, sb).map(|_| ())
    }

    fn fee(&self) -> Amount {
        self.collected_fee()
    }
}

// =============================================================================
// SHARED CHECKS
// =============================================================================

pub(crate) fn wrong_payload(expected: PayloadKind, trx: &Transaction) -> ExecutionError {
    ExecutionError::WrongPayload {
        expected,
        actual: trx.kind(),
    }
}

pub(crate) fn existing_account(sb: &Sandbox, address: &Address) -> ExecutionResult<Account> {
    sb.account(address)
        .ok_or(ExecutionError::UnknownAccount { address: *address })
}

pub(crate) fn existing_validator(sb: &Sandbox, address: &Address) -> ExecutionResult<Validator> {
    sb.validator(address)
        .ok_or(ExecutionError::UnknownValidator { address: *address })
}

/// `actual` must be exactly one past the signer's `current` sequence.
/// Returns the sequence to store once the transaction applies.
pub(crate) fn check_sequence(current: u64, actual: u64) -> ExecutionResult<u64> {
    let expected = current
        .checked_add(1)
        .ok_or(ExecutionError::SequenceExhausted { current })?;
    if actual != expected {
        return Err(ExecutionError::InvalidSequence { expected, actual });
    }
    Ok(expected)
}

/// Strict-mode rejection for a validator that holds a committee seat or
/// takes one at the next commit.
pub(crate) fn committee_race(sb: &Sandbox, address: &Address) -> ExecutionError {
    if sb.committee().contains(address) {
        ExecutionError::InCommittee { address: *address }
    } else {
        ExecutionError::JoiningCommittee { address: *address }
    }
}

/// `amount + fee`, which must not exceed `available`.
pub(crate) fn required_funds(
    amount: Amount,
    fee: Amount,
    available: Amount,
) -> ExecutionResult<Amount> {
    match amount.checked_add(fee) {
        Some(required) if required <= available => Ok(required),
        Some(required) => Err(ExecutionError::InsufficientFunds {
            required,
            available,
        }),
        None => Err(ExecutionError::InsufficientFunds {
            required: Amount::MAX,
            available,
        }),
    }
}

/// `account` credited with `amount`.
pub(crate) fn credit(mut account: Account, amount: Amount) -> ExecutionResult<Account> {
    account.balance = account
        .balance
        .checked_add(amount)
        .ok_or(ExecutionError::BalanceOverflow {
            address: account.address,
        })?;
    Ok(account)
}
