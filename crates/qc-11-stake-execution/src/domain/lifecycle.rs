//! # Validator Lifecycle
//!
//! The phase of a validator is never stored. It is derived from the
//! validator record, the committee and the current height every time an
//! executor needs it.
//!
//! ```text
//! Unknown ──bond──→ Bonded ──sortition──→ InCommittee
//!                     │                        │
//!                     └────────unbond──────────┘
//!                                 ↓
//!                            Unbonding ──cooldown──→ Unbonded
//!                                                       │
//!                     Bonded ←────────re-bond───────────┘
//! ```
//!
//! Executors branch on `state_of` rather than re-checking the record
//! fields one by one.

use qc_04_ledger_sandbox::{Committee, ProtocolParams, Sandbox, Validator};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Height};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleState {
    /// No validator record exists.
    Unknown,
    /// Holds stake, outside the committee.
    Bonded,
    /// Seated in the committee, or selected at the current height.
    InCommittee,
    /// Unbond executed; stake is locked until the cooldown elapses.
    Unbonding,
    /// Cooldown elapsed: remaining stake may be withdrawn or re-bonded.
    /// Also a record that holds no stake at all.
    Unbonded,
}

/// Whether the unbonding cooldown of `val` has elapsed at `current`.
/// False for a validator that never unbonded.
pub fn cooldown_elapsed(val: &Validator, current: Height, params: &ProtocolParams) -> bool {
    val.has_unbonded() && current.saturating_sub(val.unbonding_height) >= params.unbond_interval
}

/// Whether `val` won sortition at `current` and takes its seat at the next
/// commit.
pub fn is_freshly_joined(val: &Validator, current: Height) -> bool {
    val.last_joined_height > 0 && val.last_joined_height == current
}

pub fn derive_state(
    validator: Option<&Validator>,
    committee: &Committee,
    current: Height,
    params: &ProtocolParams,
) -> LifecycleState {
    let Some(val) = validator else {
        return LifecycleState::Unknown;
    };

    if val.has_unbonded() {
        return if cooldown_elapsed(val, current, params) {
            LifecycleState::Unbonded
        } else {
            LifecycleState::Unbonding
        };
    }

    if committee.contains(&val.address) || is_freshly_joined(val, current) {
        LifecycleState::InCommittee
    } else if val.stake > 0 {
        LifecycleState::Bonded
    } else {
        LifecycleState::Unbonded
    }
}

/// Lifecycle phase of `address` as seen through `sb`.
pub fn state_of(sb: &Sandbox, address: &Address) -> LifecycleState {
    derive_state(
        sb.validator(address).as_ref(),
        sb.committee(),
        sb.current_height(),
        sb.params(),
    )
}
