//! Settings store for DAO parameters.
//!
//! Every recognized key exists from genesis with its default value. Writes go
//! through the key's validator; a rejected write leaves the store untouched.
//! Who may write (owner during bootstrap, passed proposals afterwards) is
//! decided by the caller of [`SettingsStore::set`].

use super::error::{DaoError, DaoResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Recognized setting keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SettingKey {
    /// Fraction of members whose votes pass a proposal, [0.51, 0.90].
    #[serde(rename = "quorum")]
    Quorum,
    /// Bond recorded for newly admitted members.
    #[serde(rename = "rplbond")]
    RplBond,
    /// Cap on unbonded minipools a trusted node may run.
    #[serde(rename = "minipool.unbonded.max")]
    MinipoolUnbondedMax,
    /// Ledger heights a member must wait between proposals.
    #[serde(rename = "proposal.cooldown")]
    ProposalCooldown,
    /// Ledger heights a proposal stays open for voting.
    #[serde(rename = "proposal.vote.blocks")]
    ProposalVoteBlocks,
}

impl SettingKey {
    pub const ALL: [SettingKey; 5] = [
        SettingKey::Quorum,
        SettingKey::RplBond,
        SettingKey::MinipoolUnbondedMax,
        SettingKey::ProposalCooldown,
        SettingKey::ProposalVoteBlocks,
    ];

    /// Wire name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quorum => "quorum",
            Self::RplBond => "rplbond",
            Self::MinipoolUnbondedMax => "minipool.unbonded.max",
            Self::ProposalCooldown => "proposal.cooldown",
            Self::ProposalVoteBlocks => "proposal.vote.blocks",
        }
    }

    /// Genesis value.
    pub fn default_value(&self) -> Decimal {
        match self {
            Self::Quorum => QUORUM_MIN,
            Self::RplBond => Decimal::new(15_000, 0),
            Self::MinipoolUnbondedMax => Decimal::new(30, 0),
            Self::ProposalCooldown => Decimal::ZERO,
            Self::ProposalVoteBlocks => Decimal::new(92_550, 0),
        }
    }

    /// Check `value` against this key's domain.
    pub fn validate(&self, value: Decimal) -> DaoResult<()> {
        let invalid = |reason: &str| DaoError::InvalidSettingValue {
            key: self.as_str().to_string(),
            reason: reason.to_string(),
        };

        match self {
            Self::Quorum => {
                if value < QUORUM_MIN || value > QUORUM_MAX {
                    return Err(invalid("Quorum setting must be >= 51% and <= 90%"));
                }
            }
            Self::RplBond => {
                if value.is_sign_negative() && !value.is_zero() {
                    return Err(invalid("Bond amount cannot be negative"));
                }
            }
            Self::MinipoolUnbondedMax | Self::ProposalCooldown => {
                if !is_u64(value) {
                    return Err(invalid("Value must be a non-negative whole number"));
                }
            }
            Self::ProposalVoteBlocks => {
                if !is_u64(value) || value.is_zero() {
                    return Err(invalid("Voting window must be a whole number of at least 1"));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = DaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| DaoError::UnknownSetting(s.to_string()))
    }
}

/// Lower bound of the quorum domain (inclusive).
pub const QUORUM_MIN: Decimal = Decimal::from_parts(51, 0, 0, false, 2);

/// Upper bound of the quorum domain (inclusive).
pub const QUORUM_MAX: Decimal = Decimal::from_parts(90, 0, 0, false, 2);

fn is_u64(value: Decimal) -> bool {
    value.fract().is_zero() && value.to_u64().is_some()
}

/// Keyed, validated parameter store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsStore {
    values: BTreeMap<SettingKey, Decimal>,
}

impl SettingsStore {
    /// Store populated with every key's default.
    pub fn genesis() -> Self {
        Self {
            values: SettingKey::ALL
                .iter()
                .map(|key| (*key, key.default_value()))
                .collect(),
        }
    }

    /// Read a setting by name.
    pub fn get(&self, key: &str) -> DaoResult<Decimal> {
        let key: SettingKey = key.parse()?;
        self.get_key(key)
    }

    /// Read a setting by typed key.
    pub fn get_key(&self, key: SettingKey) -> DaoResult<Decimal> {
        self.values
            .get(&key)
            .copied()
            .ok_or_else(|| DaoError::UnknownSetting(key.as_str().to_string()))
    }

    /// Validate a write without applying it.
    pub fn check(&self, key: &str, value: Decimal) -> DaoResult<SettingKey> {
        let key: SettingKey = key.parse()?;
        key.validate(value)?;
        Ok(key)
    }

    /// Overwrite a setting. Validation failure leaves the store unchanged.
    pub fn set(&mut self, key: &str, value: Decimal) -> DaoResult<()> {
        let key = self.check(key, value)?;
        self.values.insert(key, value);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (SettingKey, Decimal)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    pub fn quorum(&self) -> Decimal {
        self.typed(SettingKey::Quorum)
    }

    pub fn rpl_bond(&self) -> Decimal {
        self.typed(SettingKey::RplBond)
    }

    pub fn proposal_cooldown(&self) -> u64 {
        self.typed(SettingKey::ProposalCooldown)
            .to_u64()
            .unwrap_or_default()
    }

    pub fn proposal_vote_blocks(&self) -> u64 {
        self.typed(SettingKey::ProposalVoteBlocks)
            .to_u64()
            .unwrap_or(1)
    }

    fn typed(&self, key: SettingKey) -> Decimal {
        self.values
            .get(&key)
            .copied()
            .unwrap_or_else(|| key.default_value())
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::genesis()
    }
}
