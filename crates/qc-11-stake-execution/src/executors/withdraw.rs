use super::{
    check_sequence, credit, existing_validator, required_funds, wrong_payload, StakeExecutor,
};
use crate::domain::{state_of, ExecutionError, ExecutionResult, LifecycleState};
use qc_04_ledger_sandbox::{Account, Sandbox, Validator};
use shared_types::{Amount, Payload, PayloadKind, Transaction};

/// Releases unbonded stake to an account once the cooldown has elapsed.
///
/// `amount + fee` leaves the stake; `amount` reaches the receiving account,
/// which is created if it does not exist yet.
#[derive(Debug, Default)]
pub struct WithdrawExecutor {
    fee: Amount,
}

#[derive(Debug)]
pub struct WithdrawPlan {
    validator: Validator,
    receiver: Account,
    fee: Amount,
}

impl WithdrawExecutor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StakeExecutor for WithdrawExecutor {
    type Plan = WithdrawPlan;

    fn validate(&self, trx: &Transaction, sb: &Sandbox) -> ExecutionResult<WithdrawPlan> {
        let Payload::Withdraw(pld) = &trx.payload else {
            return Err(wrong_payload(PayloadKind::Withdraw, trx));
        };

        let mut val = existing_validator(sb, &pld.from)?;
        let sequence = check_sequence(val.sequence, trx.sequence)?;

        match state_of(sb, &val.address) {
            LifecycleState::Unbonded if val.has_unbonded() => {}
            LifecycleState::Unbonding => {
                return Err(ExecutionError::CooldownPending {
                    unbonding_height: val.unbonding_height,
                    current: sb.current_height(),
                    interval: sb.params().unbond_interval,
                });
            }
            _ => {
                return Err(ExecutionError::NotUnbonded {
                    address: val.address,
                });
            }
        }
        let required = required_funds(pld.amount, trx.fee, val.stake)?;

        let receiver = sb
            .account(&pld.to)
            .unwrap_or_else(|| sb.make_new_account(pld.to));
        let receiver = credit(receiver, pld.amount)?;

        val.stake -= required;
        val.sequence = sequence;

        Ok(WithdrawPlan {
            validator: val,
            receiver,
            fee: trx.fee,
        })
    }

    fn apply(&mut self, plan: WithdrawPlan, sb: &mut Sandbox) {
        sb.update_validator(plan.validator);
        sb.update_account(plan.receiver);
        self.fee = plan.fee;
    }

    fn collected_fee(&self) -> Amount {
        self.fee
    }
}
