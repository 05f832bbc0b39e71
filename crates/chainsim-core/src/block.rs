use crate::{
    config::{ChainConfig, OddLeafRule},
    hash::HashAlgorithm,
    ledger::Ledger,
    merkle::merkle_root,
    miner::Miner,
    pow::{find_nonce, find_nonce_parallel},
    Block, Seal, Transaction,
};
use tracing::info;

/// Turns one batch of applied transactions into a finished block.
#[derive(Clone, Copy, Debug)]
pub struct BlockBuilder {
    hash: HashAlgorithm,
    odd_leaf: OddLeafRule,
    parallel_nonce_search: bool,
}

impl BlockBuilder {
    pub fn new(config: &ChainConfig) -> Self {
        Self {
            hash: config.hash,
            odd_leaf: config.odd_leaf,
            parallel_nonce_search: config.parallel_nonce_search,
        }
    }

    /// `hash(prev_hash ++ number ++ merkle_root)`, no separators.
    pub fn block_hash(&self, prev_hash: &str, number: u64, merkle_root: &str) -> String {
        self.hash
            .hash_str(&format!("{prev_hash}{number}{merkle_root}"))
    }

    fn nonce_for(&self, block_hash: &str) -> u64 {
        if self.parallel_nonce_search {
            find_nonce_parallel(self.hash, block_hash)
        } else {
            find_nonce(self.hash, block_hash)
        }
    }

    /// Computes the commitments. With a miner the block also gets a nonce.
    pub fn build(
        &self,
        number: u64,
        prev_hash: String,
        txs: Vec<Transaction>,
        miner: Option<&Miner>,
    ) -> Block {
        let merkle_root = merkle_root(&txs, self.hash, self.odd_leaf);
        let hash = self.block_hash(&prev_hash, number, &merkle_root);
        let seal = miner.map(|miner| Seal {
            nonce: self.nonce_for(&hash),
            miner: miner.clone(),
        });
        Block {
            number,
            prev_hash,
            txs,
            merkle_root,
            hash,
            seal,
        }
    }

    /// [`build`](Self::build) followed by crediting `reward` to the selected miner.
    pub fn seal(
        &self,
        number: u64,
        prev_hash: String,
        txs: Vec<Transaction>,
        miner: Option<&Miner>,
        reward: Option<i64>,
        ledger: &mut Ledger,
    ) -> Block {
        let block = self.build(number, prev_hash, txs, miner);
        if let (Some(seal), Some(reward)) = (&block.seal, reward) {
            ledger.credit(seal.miner.id(), reward);
        }
        info!(
            number = block.number,
            hash = &block.hash[..12.min(block.hash.len())],
            txs = block.txs.len(),
            nonce = block.nonce(),
            miner = block.miner().map(Miner::id),
            "block sealed"
        );
        block
    }
}
