//! Sortition executor
//!
//! Admits a bonded validator into the committee when its sortition proof
//! verifies. The seat is taken when the block is committed; until then the
//! validator counts as freshly joined.

use super::{check_sequence, committee_race, existing_validator, wrong_payload, StakeExecutor};
use crate::domain::{state_of, ExecutionError, ExecutionMode, ExecutionResult, LifecycleState};
use crate::ports::SortitionVerifier;
use qc_04_ledger_sandbox::{Sandbox, Validator};
use shared_types::{Amount, Payload, PayloadKind, Transaction};
use std::sync::Arc;

pub struct SortitionExecutor {
    mode: ExecutionMode,
    verifier: Arc<dyn SortitionVerifier>,
}

#[derive(Debug)]
pub struct SortitionPlan {
    validator: Validator,
}

impl SortitionExecutor {
    pub fn new(mode: ExecutionMode, verifier: Arc<dyn SortitionVerifier>) -> Self {
        Self { mode, verifier }
    }

    /// Most validators allowed to join in one block.
    fn join_limit(committee_size: usize) -> usize {
        (committee_size / 3).max(1)
    }
}

impl StakeExecutor for SortitionExecutor {
    type Plan = SortitionPlan;

    fn validate(&self, trx: &Transaction, sb: &Sandbox) -> ExecutionResult<SortitionPlan> {
        let Payload::Sortition(pld) = &trx.payload else {
            return Err(wrong_payload(PayloadKind::Sortition, trx));
        };

        let mut val = existing_validator(sb, &pld.address)?;
        let state = state_of(sb, &val.address);
        match state {
            LifecycleState::Unbonding | LifecycleState::Unbonded if val.has_unbonded() => {
                return Err(ExecutionError::AlreadyUnbonding {
                    address: val.address,
                    since: val.unbonding_height,
                });
            }
            _ if val.stake == 0 => {
                return Err(ExecutionError::NoStake {
                    address: val.address,
                });
            }
            _ => {}
        }

        let stamp_height = sb
            .recent_block_height(&trx.stamp)
            .ok_or(ExecutionError::UnknownStamp { stamp: trx.stamp })?;
        if stamp_height.saturating_sub(val.last_bonding_height) < sb.params().bond_interval {
            return Err(ExecutionError::BondTooRecent {
                last_bonding_height: val.last_bonding_height,
                stamp_height,
            });
        }

        let sequence = check_sequence(val.sequence, trx.sequence)?;

        if !self.verifier.verify_proof(&trx.stamp, &pld.proof, &val) {
            return Err(ExecutionError::InvalidProof {
                address: val.address,
            });
        }

        if val.last_joined_height > 0 && stamp_height <= val.last_joined_height {
            return Err(ExecutionError::DuplicateSortition {
                last_joined_height: val.last_joined_height,
                stamp_height,
            });
        }

        if self.mode.is_strict() {
            if state == LifecycleState::InCommittee {
                return Err(committee_race(sb, &val.address));
            }
            let limit = Self::join_limit(sb.params().committee_size);
            if sb.joined_validators().len() + 1 > limit {
                return Err(ExecutionError::CommitteeJoinLimit { limit });
            }
        }

        val.sequence = sequence;
        val.last_joined_height = sb.current_height();
        Ok(SortitionPlan { validator: val })
    }

    fn apply(&mut self, plan: SortitionPlan, sb: &mut Sandbox) {
        let stake = plan.validator.stake;
        sb.update_validator(plan.validator);
        sb.update_power_delta(stake);
    }

    fn collected_fee(&self) -> Amount {
        0
    }
}
