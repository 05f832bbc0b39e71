use crate::{
    constants::DEFAULT_BATCH_SIZE,
    error::{ChainError, Result},
    hash::HashAlgorithm,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How an odd node at the end of a Merkle level reaches the next level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OddLeafRule {
    /// Promote the unpaired hash unchanged. Empty batch root is `""`.
    #[default]
    CarryForward,
    /// Replace the unpaired hash with `hash(h)`. Empty batch root is `hash("")`.
    Rehash,
}

/// `Full` selects a miner, searches a nonce and may pay a reward.
/// `Basic` only commits transactions (no miner section in the input).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Full,
    Basic,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewardSource {
    /// Read the reward from its own line between the transactions and the miners.
    #[default]
    Input,
    Fixed(i64),
    None,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChainConfig {
    pub hash: HashAlgorithm,
    pub batch_size: usize,
    pub odd_leaf: OddLeafRule,
    pub mode: Mode,
    pub block_reward: RewardSource,
    pub parallel_nonce_search: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            hash: HashAlgorithm::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            odd_leaf: OddLeafRule::default(),
            mode: Mode::default(),
            block_reward: RewardSource::default(),
            parallel_nonce_search: false,
        }
    }
}

/// Which optional sections the input text carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputLayout {
    pub block_reward: bool,
    pub miners: bool,
}

impl ChainConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: ChainConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(ChainError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if let RewardSource::Fixed(amount) = self.block_reward {
            if amount < 0 {
                return Err(ChainError::InvalidConfig(format!(
                    "block reward must not be negative, got {amount}"
                )));
            }
        }
        Ok(())
    }

    pub fn input_layout(&self) -> InputLayout {
        let miners = self.mode == Mode::Full;
        InputLayout {
            block_reward: miners && self.block_reward == RewardSource::Input,
            miners,
        }
    }

    /// Reward credited per sealed block, given the value read from input (if any).
    pub fn resolve_reward(&self, from_input: Option<i64>) -> Option<i64> {
        if self.mode == Mode::Basic {
            return None;
        }
        match self.block_reward {
            RewardSource::Input => from_input,
            RewardSource::Fixed(amount) => Some(amount),
            RewardSource::None => None,
        }
    }
}

impl FromStr for OddLeafRule {
    type Err = ChainError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "carry-forward" | "carry" => Ok(OddLeafRule::CarryForward),
            "rehash" => Ok(OddLeafRule::Rehash),
            other => Err(ChainError::InvalidConfig(format!(
                "unknown odd-leaf rule `{other}`"
            ))),
        }
    }
}

impl FromStr for Mode {
    type Err = ChainError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "full" => Ok(Mode::Full),
            "basic" => Ok(Mode::Basic),
            other => Err(ChainError::InvalidConfig(format!("unknown mode `{other}`"))),
        }
    }
}

impl FromStr for RewardSource {
    type Err = ChainError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "input" => Ok(RewardSource::Input),
            "none" => Ok(RewardSource::None),
            n => n.parse::<i64>().map(RewardSource::Fixed).map_err(|_| {
                ChainError::InvalidConfig(format!(
                    "reward must be `input`, `none` or an integer, got `{n}`"
                ))
            }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Full => f.write_str("full"),
            Mode::Basic => f.write_str("basic"),
        }
    }
}
