//! Protocol parameters
//!
//! Thresholds the executors enforce. Deployments supply them through
//! `ProtocolParams::from_json`; `Default` carries development values only.

use super::errors::SandboxError;
use serde::{Deserialize, Serialize};
use shared_types::{Amount, Height};

/// Fee fraction denominator: `fee_fraction_bps` is in basis points.
pub const BPS_DENOMINATOR: u64 = 10_000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolParams {
    /// Maximum number of committee seats.
    pub committee_size: usize,
    /// Blocks a bond must age before its validator may run sortition.
    pub bond_interval: Height,
    /// Unbonding cooldown: blocks between unbond and withdraw/re-bond.
    pub unbond_interval: Height,
    /// Blocks a stamp stays valid for ordinary transactions.
    pub transaction_to_live_interval: Height,
    /// Blocks a stamp stays valid for sortition transactions.
    pub sortition_interval: Height,
    /// Fee as a fraction of the amount, in basis points.
    pub fee_fraction_bps: u64,
    pub minimum_fee: Amount,
    pub maximum_fee: Amount,
    pub minimum_stake: Amount,
    pub maximum_stake: Amount,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            committee_size: 51,
            bond_interval: 360,
            unbond_interval: 181_440,
            transaction_to_live_interval: 8_640,
            sortition_interval: 17,
            fee_fraction_bps: 1,
            minimum_fee: 1_000,
            maximum_fee: 1_000_000,
            minimum_stake: 1_000_000_000,
            maximum_stake: 1_000_000_000_000,
        }
    }
}

impl ProtocolParams {
    /// Parses and validates a JSON parameter document. Missing fields take
    /// their default.
    pub fn from_json(json: &str) -> Result<Self, SandboxError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), SandboxError> {
        if self.committee_size == 0 {
            return Err(SandboxError::InvalidParams(
                "committee_size must be positive".into(),
            ));
        }
        if self.fee_fraction_bps > BPS_DENOMINATOR {
            return Err(SandboxError::InvalidParams(format!(
                "fee_fraction_bps {} exceeds {}",
                self.fee_fraction_bps, BPS_DENOMINATOR
            )));
        }
        if self.minimum_fee > self.maximum_fee {
            return Err(SandboxError::InvalidParams(format!(
                "minimum_fee {} > maximum_fee {}",
                self.minimum_fee, self.maximum_fee
            )));
        }
        if self.minimum_stake > self.maximum_stake {
            return Err(SandboxError::InvalidParams(format!(
                "minimum_stake {} > maximum_stake {}",
                self.minimum_stake, self.maximum_stake
            )));
        }
        Ok(())
    }

    /// Fee for moving `amount`: the configured fraction, clamped to
    /// `[minimum_fee, maximum_fee]`.
    pub fn calculate_fee(&self, amount: Amount) -> Amount {
        let raw = u128::from(amount) * u128::from(self.fee_fraction_bps)
            / u128::from(BPS_DENOMINATOR);
        let raw = Amount::try_from(raw).unwrap_or(Amount::MAX);
        raw.clamp(self.minimum_fee, self.maximum_fee)
    }
}
