//! Bond executor
//!
//! Moves balance from an account into a validator's stake, creating the
//! validator on first bond. Checks run in a fixed order and the first
//! failing one decides the error:
//!
//! 1. sender account exists
//! 2. receiver is not the treasury
//! 3. sequence
//! 4. balance covers stake + fee
//! 5. receiver is not in the committee (strict only)
//! 6. receiver did not just win sortition (strict only)
//! 7. receiver's unbonding cooldown, if any, has elapsed
//! 8. public key is present for a new validator and absent otherwise
//! 9. resulting stake is within `[minimum_stake, maximum_stake]`

use super::{
    check_sequence, committee_race, existing_account, required_funds, wrong_payload,
    StakeExecutor,
};
use crate::domain::{state_of, ExecutionError, ExecutionMode, ExecutionResult, LifecycleState};
use qc_04_ledger_sandbox::{Account, Sandbox, Validator};
use shared_types::{Amount, Payload, PayloadKind, Transaction};
use tracing::debug;

#[derive(Debug)]
pub struct BondExecutor {
    mode: ExecutionMode,
    fee: Amount,
}

#[derive(Debug)]
pub struct BondPlan {
    sender: Account,
    validator: Validator,
    stake: Amount,
    fee: Amount,
}

impl BondExecutor {
    pub fn new(mode: ExecutionMode) -> Self {
        Self { mode, fee: 0 }
    }
}

impl StakeExecutor for BondExecutor {
    type Plan = BondPlan;

    fn validate(&self, trx: &Transaction, sb: &Sandbox) -> ExecutionResult<BondPlan> {
        let Payload::Bond(pld) = &trx.payload else {
            return Err(wrong_payload(PayloadKind::Bond, trx));
        };

        let mut sender = existing_account(sb, &pld.sender)?;
        if pld.receiver == sb.treasury_address() {
            return Err(ExecutionError::TreasuryReceiver);
        }
        let sequence = check_sequence(sender.sequence, trx.sequence)?;
        let required = required_funds(pld.stake, trx.fee, sender.balance)?;

        let current = sb.current_height();
        let state = state_of(sb, &pld.receiver);
        if self.mode.is_strict() && state == LifecycleState::InCommittee {
            return Err(committee_race(sb, &pld.receiver));
        }

        let mut validator = match sb.validator(&pld.receiver) {
            Some(val) => {
                if state == LifecycleState::Unbonding {
                    return Err(ExecutionError::CooldownPending {
                        unbonding_height: val.unbonding_height,
                        current,
                        interval: sb.params().unbond_interval,
                    });
                }
                if pld.public_key.is_some() {
                    return Err(ExecutionError::PublicKeyNotAllowed {
                        address: pld.receiver,
                    });
                }
                val
            }
            None => {
                let Some(pk) = pld.public_key else {
                    return Err(ExecutionError::PublicKeyRequired {
                        address: pld.receiver,
                    });
                };
                if pk.address() != pld.receiver {
                    return Err(ExecutionError::PublicKeyMismatch {
                        address: pld.receiver,
                    });
                }
                sb.make_new_validator(pk)
            }
        };

        let params = sb.params();
        let stake = validator
            .stake
            .checked_add(pld.stake)
            .ok_or(ExecutionError::StakeOverflow {
                stake: validator.stake,
                added: pld.stake,
            })?;
        if stake > params.maximum_stake {
            return Err(ExecutionError::StakeAboveMaximum {
                stake,
                maximum: params.maximum_stake,
            });
        }
        if stake < params.minimum_stake {
            return Err(ExecutionError::StakeBelowMinimum {
                stake,
                minimum: params.minimum_stake,
            });
        }

        sender.balance -= required;
        sender.sequence = sequence;

        if validator.has_unbonded() {
            debug!(validator = %validator.address, "Re-bonding after cooldown");
            validator.unbonding_height = 0;
        }
        validator.stake = stake;
        validator.last_bonding_height = current;

        Ok(BondPlan {
            sender,
            validator,
            stake: pld.stake,
            fee: trx.fee,
        })
    }

    fn apply(&mut self, plan: BondPlan, sb: &mut Sandbox) {
        sb.update_account(plan.sender);
        sb.update_validator(plan.validator);
        sb.update_power_delta(plan.stake);
        self.fee = plan.fee;
    }

    fn collected_fee(&self) -> Amount {
        self.fee
    }
}
