//! Single-pass block construction over an in-memory ledger.
//!
//! Pending transactions are ordered by incentive, applied against account
//! balances, cut into fixed-size batches and sealed into hash-linked blocks.

pub mod block;
pub mod config;
pub mod constants;
pub mod error;
pub mod hash;
pub mod input;
pub mod ledger;
pub mod merkle;
pub mod miner;
pub mod pipeline;
pub mod pow;
pub mod render;
pub mod selector;

pub use block::BlockBuilder;
pub use config::{ChainConfig, InputLayout, Mode, OddLeafRule, RewardSource};
pub use error::{ChainError, Result};
pub use hash::HashAlgorithm;
pub use input::SimulationInput;
pub use ledger::Ledger;
pub use merkle::merkle_root;
pub use miner::{Miner, MinerRegistry};
pub use pipeline::{Chain, Pipeline};

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub from: String,
    pub to: String,
    pub amount: i64,
    pub incentive: i64,
}

impl Transaction {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: i64, incentive: i64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
            incentive,
        }
    }

    /// Sender, incentive, receiver, amount; decimal, no separators.
    pub fn commitment_preimage(&self) -> String {
        format!("{}{}{}{}", self.from, self.incentive, self.to, self.amount)
    }

    pub fn commitment_hash(&self, hash: HashAlgorithm) -> String {
        hash.hash_str(&self.commitment_preimage())
    }
}

/// Proof-of-work result and the miner that sealed the block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Seal {
    pub nonce: u64,
    pub miner: Miner,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Block {
    pub number: u64,
    pub prev_hash: String,
    pub txs: Vec<Transaction>,
    pub merkle_root: String,
    pub hash: String,
    /// Absent in basic mode.
    pub seal: Option<Seal>,
}

impl Block {
    pub fn nonce(&self) -> Option<u64> {
        self.seal.as_ref().map(|s| s.nonce)
    }

    pub fn miner(&self) -> Option<&Miner> {
        self.seal.as_ref().map(|s| &s.miner)
    }
}
