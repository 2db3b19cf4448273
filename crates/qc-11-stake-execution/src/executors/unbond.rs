use super::{check_sequence, committee_race, wrong_payload, StakeExecutor};
use crate::domain::{state_of, ExecutionError, ExecutionMode, ExecutionResult, LifecycleState};
use qc_04_ledger_sandbox::{Sandbox, Validator};
use shared_types::{Amount, Payload, PayloadKind, Transaction};

/// Starts the unbonding cooldown of a validator.
///
/// The stake stays on the validator record until it is withdrawn. Unbond is
/// fee-exempt, so `fee()` is always 0.
#[derive(Debug)]
pub struct UnbondExecutor {
    mode: ExecutionMode,
}

#[derive(Debug)]
pub struct UnbondPlan {
    validator: Validator,
}

impl UnbondExecutor {
    pub fn new(mode: ExecutionMode) -> Self {
        Self { mode }
    }
}

impl StakeExecutor for UnbondExecutor {
    type Plan = UnbondPlan;

    fn validate(&self, trx: &Transaction, sb: &Sandbox) -> ExecutionResult<UnbondPlan> {
        let Payload::Unbond(pld) = &trx.payload else {
            return Err(wrong_payload(PayloadKind::Unbond, trx));
        };

        let mut val = sb
            .validator(&pld.validator)
            .filter(|val| val.stake > 0)
            .ok_or(ExecutionError::UnknownValidator {
                address: pld.validator,
            })?;
        let sequence = check_sequence(val.sequence, trx.sequence)?;

        match state_of(sb, &val.address) {
            LifecycleState::Unbonding | LifecycleState::Unbonded => {
                return Err(ExecutionError::AlreadyUnbonding {
                    address: val.address,
                    since: val.unbonding_height,
                });
            }
            LifecycleState::InCommittee if self.mode.is_strict() => {
                return Err(committee_race(sb, &val.address));
            }
            _ => {}
        }

        val.sequence = sequence;
        val.unbonding_height = sb.current_height();
        Ok(UnbondPlan { validator: val })
    }

    fn apply(&mut self, plan: UnbondPlan, sb: &mut Sandbox) {
        sb.update_validator(plan.validator);
    }

    fn collected_fee(&self) -> Amount {
        0
    }
}
