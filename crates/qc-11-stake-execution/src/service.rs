//! Stake Execution Service
//!
//! Dispatches transactions to the executor matching their payload kind.
//!
//! Before an executor runs, the service checks what every kind shares:
//! 1. Memo length
//! 2. Stamp freshness
//! 3. Fee policy
//!
//! The executor then validates and, on success, applies.

use crate::domain::{ExecutionError, ExecutionMode, ExecutionResult};
use crate::executors::{
    BondExecutor, Executor, SortitionExecutor, TransferExecutor, UnbondExecutor, WithdrawExecutor,
};
use crate::ports::SortitionVerifier;
use qc_04_ledger_sandbox::Sandbox;
use shared_types::{Amount, Hash, PayloadKind, Transaction, MAX_MEMO_LENGTH};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Outcome of one transaction in a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxOutcome {
    pub hash: Hash,
    pub kind: PayloadKind,
    /// Fee collected, or the rejection.
    pub result: Result<Amount, ExecutionError>,
}

/// Result of executing a batch of transactions in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<TxOutcome>,
    /// Sum of the fees of accepted transactions.
    pub total_fee: Amount,
}

impl BatchReport {
    pub fn accepted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn rejected(&self) -> usize {
        self.outcomes.len() - self.accepted()
    }

    pub fn all_accepted(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// Stake Execution Service
///
/// Holds one executor per `PayloadKind`, all configured with the same
/// mode. Use one service per mode: a strict one for block execution and a
/// lenient one for mempool admission.
pub struct ExecutionService {
    mode: ExecutionMode,
    transfer: TransferExecutor,
    bond: BondExecutor,
    unbond: UnbondExecutor,
    withdraw: WithdrawExecutor,
    sortition: SortitionExecutor,
}

impl ExecutionService {
    pub fn new(mode: ExecutionMode, verifier: Arc<dyn SortitionVerifier>) -> Self {
        Self {
            mode,
            transfer: TransferExecutor::new(),
            bond: BondExecutor::new(mode),
            unbond: UnbondExecutor::new(mode),
            withdraw: WithdrawExecutor::new(),
            sortition: SortitionExecutor::new(mode, verifier),
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    fn executor(&self, kind: PayloadKind) -> &dyn Executor {
        match kind {
            PayloadKind::Transfer => &self.transfer,
            PayloadKind::Bond => &self.bond,
            PayloadKind::Unbond => &self.unbond,
            PayloadKind::Withdraw => &self.withdraw,
            PayloadKind::Sortition => &self.sortition,
        }
    }

    fn executor_mut(&mut self, kind: PayloadKind) -> &mut dyn Executor {
        match kind {
            PayloadKind::Transfer => &mut self.transfer,
            PayloadKind::Bond => &mut self.bond,
            PayloadKind::Unbond => &mut self.unbond,
            PayloadKind::Withdraw => &mut self.withdraw,
            PayloadKind::Sortition => &mut self.sortition,
        }
    }

    /// Checks shared by every payload kind.
    fn check_common(&self, trx: &Transaction, sb: &Sandbox) -> ExecutionResult<()> {
        if trx.memo.len() > MAX_MEMO_LENGTH {
            return Err(ExecutionError::MemoTooLong {
                length: trx.memo.len(),
                max: MAX_MEMO_LENGTH,
            });
        }

        let params = sb.params();
        let block_height = sb
            .recent_block_height(&trx.stamp)
            .ok_or(ExecutionError::UnknownStamp { stamp: trx.stamp })?;
        let window = match trx.kind() {
            PayloadKind::Sortition => params.sortition_interval,
            _ => params.transaction_to_live_interval,
        };
        let current = sb.current_height();
        if current.saturating_sub(block_height) > window {
            return Err(ExecutionError::ExpiredStamp {
                stamp: trx.stamp,
                block_height,
                current,
            });
        }

        let expected = if trx.kind().is_fee_exempt() {
            0
        } else {
            params.calculate_fee(trx.amount())
        };
        if trx.fee != expected {
            return Err(ExecutionError::InvalidFee {
                expected,
                actual: trx.fee,
            });
        }

        Ok(())
    }

    /// Validates `trx` against `sb` without mutating it.
    #[instrument(skip_all, fields(tx = %trx.id(), kind = %trx.kind(), mode = %self.mode))]
    pub fn check(&self, trx: &Transaction, sb: &Sandbox) -> ExecutionResult<()> {
        let result = self
            .check_common(trx, sb)
            .and_then(|()| self.executor(trx.kind()).check(trx, sb));
        if let Err(err) = &result {
            debug!(error = %err, error_kind = ?err.kind(), "Transaction check failed");
        }
        result
    }

    /// Executes `trx` on `sb` and returns the collected fee.
    ///
    /// On error `sb` is left exactly as it was.
    #[instrument(skip_all, fields(tx = %trx.id(), kind = %trx.kind(), mode = %self.mode))]
    pub fn execute(&mut self, trx: &Transaction, sb: &mut Sandbox) -> ExecutionResult<Amount> {
        if let Err(err) = self.check_common(trx, sb) {
            debug!(error = %err, error_kind = ?err.kind(), "Transaction rejected");
            return Err(err);
        }

        let exe = self.executor_mut(trx.kind());
        match exe.execute(trx, sb) {
            Ok(()) => {
                let fee = exe.fee();
                debug!(fee, height = sb.current_height(), "Transaction executed");
                Ok(fee)
            }
            Err(err) => {
                debug!(error = %err, error_kind = ?err.kind(), "Transaction rejected");
                Err(err)
            }
        }
    }

    /// Executes `transactions` in order. Each one sees the effects of those
    /// before it; a rejection never stops the batch.
    pub fn execute_batch(&mut self, transactions: &[Transaction], sb: &mut Sandbox) -> BatchReport {
        let mut report = BatchReport::default();
        for trx in transactions {
            let result = self.execute(trx, sb);
            if let Ok(fee) = result {
                report.total_fee = report.total_fee.saturating_add(fee);
            }
            report.outcomes.push(TxOutcome {
                hash: trx.hash(),
                kind: trx.kind(),
                result,
            });
        }

        info!(
            height = sb.current_height(),
            mode = %self.mode,
            accepted = report.accepted(),
            rejected = report.rejected(),
            total_fee = report.total_fee,
            "Executed transaction batch"
        );
        report
    }
}
