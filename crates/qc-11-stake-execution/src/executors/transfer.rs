use super::{
    check_sequence, credit, existing_account, required_funds, wrong_payload, StakeExecutor,
};
use crate::domain::ExecutionResult;
use qc_04_ledger_sandbox::{Account, Sandbox};
use shared_types::{Amount, Payload, PayloadKind, Transaction};

/// Moves balance between accounts.
#[derive(Debug, Default)]
pub struct TransferExecutor {
    fee: Amount,
}

#[derive(Debug)]
pub struct TransferPlan {
    sender: Account,
    /// `None` for a self-transfer.
    receiver: Option<Account>,
    fee: Amount,
}

impl TransferExecutor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StakeExecutor for TransferExecutor {
    type Plan = TransferPlan;

    fn validate(&self, trx: &Transaction, sb: &Sandbox) -> ExecutionResult<TransferPlan> {
        let Payload::Transfer(pld) = &trx.payload else {
            return Err(wrong_payload(PayloadKind::Transfer, trx));
        };

        let mut sender = existing_account(sb, &pld.sender)?;
        let sequence = check_sequence(sender.sequence, trx.sequence)?;
        let required = required_funds(pld.amount, trx.fee, sender.balance)?;

        sender.balance -= required;
        sender.sequence = sequence;

        let receiver = if pld.receiver == pld.sender {
            sender = credit(sender, pld.amount)?;
            None
        } else {
            let receiver = sb
                .account(&pld.receiver)
                .unwrap_or_else(|| sb.make_new_account(pld.receiver));
            Some(credit(receiver, pld.amount)?)
        };

        Ok(TransferPlan {
            sender,
            receiver,
            fee: trx.fee,
        })
    }

    fn apply(&mut self, plan: TransferPlan, sb: &mut Sandbox) {
        sb.update_account(plan.sender);
        if let Some(receiver) = plan.receiver {
            sb.update_account(receiver);
        }
        self.fee = plan.fee;
    }

    fn collected_fee(&self) -> Amount {
        self.fee
    }
}
