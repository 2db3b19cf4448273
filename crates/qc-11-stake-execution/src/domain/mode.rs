use serde::{Deserialize, Serialize};
use std::fmt;

/// Which lifecycle races an executor tolerates.
///
/// `Strict` is authoritative block execution. `Lenient` is mempool
/// admission, where the view of the committee may already be stale. The
/// mode only relaxes committee-transition checks; balance, sequence,
/// address and stake-limit checks are identical in both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Strict,
    Lenient,
}

impl ExecutionMode {
    pub fn is_strict(self) -> bool {
        self == ExecutionMode::Strict
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Strict => f.write_str("strict"),
            ExecutionMode::Lenient => f.write_str("lenient"),
        }
    }
}
