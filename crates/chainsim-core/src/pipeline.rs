use crate::{
    block::BlockBuilder,
    config::{ChainConfig, Mode},
    constants::GENESIS_PREV_HASH,
    error::Result,
    hash::HashAlgorithm,
    input::SimulationInput,
    ledger::Ledger,
    miner::MinerRegistry,
    pow::nonce_satisfies,
    selector, Block, Transaction,
};
use tracing::{debug, info};

/// Sealed blocks in order plus the balances left after the run.
#[derive(Clone, Debug)]
pub struct Chain {
    pub blocks: Vec<Block>,
    pub ledger: Ledger,
}

impl Chain {
    /// Block 1 points at `"0"`, every later block at its predecessor's hash,
    /// and numbers count up from 1 without gaps.
    pub fn verify_links(&self) -> bool {
        let mut expected_prev = GENESIS_PREV_HASH;
        for (i, block) in self.blocks.iter().enumerate() {
            if block.number != i as u64 + 1 || block.prev_hash != expected_prev {
                return false;
            }
            expected_prev = &block.hash;
        }
        true
    }

    /// Every sealed block carries the smallest nonce that satisfies the target.
    pub fn verify_seals(&self, hash: HashAlgorithm) -> bool {
        self.blocks.iter().all(|block| match block.nonce() {
            None => true,
            Some(nonce) => {
                nonce_satisfies(hash, &block.hash, nonce)
                    && (0..nonce).all(|n| !nonce_satisfies(hash, &block.hash, n))
            }
        })
    }

    pub fn tip_hash(&self) -> &str {
        self.blocks
            .last()
            .map(|b| b.hash.as_str())
            .unwrap_or(GENESIS_PREV_HASH)
    }
}

/// Drives selection and sealing for one run.
///
/// The sorted pool is walked once. Each transfer that applies joins the open
/// batch; a batch that reaches `batch_size` is sealed on the spot (reward
/// included) before the next pending transaction is looked at. A non-empty
/// remainder is sealed as the final, shorter block.
#[derive(Clone, Debug)]
pub struct Pipeline {
    config: ChainConfig,
    builder: BlockBuilder,
}

struct Sealer<'a> {
    builder: &'a BlockBuilder,
    registry: MinerRegistry,
    reward: Option<i64>,
    mode: Mode,
    number: u64,
    prev_hash: String,
}

impl Sealer<'_> {
    fn seal(&mut self, txs: Vec<Transaction>, ledger: &mut Ledger) -> Result<Block> {
        let miner = match self.mode {
            Mode::Full => Some(self.registry.select(self.number)?),
            Mode::Basic => None,
        };
        let block = self.builder.seal(
            self.number,
            std::mem::take(&mut self.prev_hash),
            txs,
            miner,
            self.reward,
            ledger,
        );
        self.prev_hash = block.hash.clone();
        self.number += 1;
        Ok(block)
    }
}

impl Pipeline {
    pub fn new(config: ChainConfig) -> Result<Self> {
        config.validate()?;
        let builder = BlockBuilder::new(&config);
        Ok(Self { config, builder })
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn run(&self, input: SimulationInput) -> Result<Chain> {
        self.run_with(input, |_| Ok(()))
    }

    /// Like [`run`](Self::run), handing each block to `emit` as soon as it is
    /// sealed. A failure aborts the run; blocks already emitted stay emitted.
    pub fn run_with<F>(&self, input: SimulationInput, mut emit: F) -> Result<Chain>
    where
        F: FnMut(&Block) -> std::io::Result<()>,
    {
        let SimulationInput {
            accounts,
            pool,
            block_reward,
            miners,
        } = input;
        let batch_size = self.config.batch_size;
        let mut ledger = Ledger::from_accounts(accounts);
        let mut sealer = Sealer {
            builder: &self.builder,
            registry: MinerRegistry::new(miners),
            reward: self.config.resolve_reward(block_reward),
            mode: self.config.mode,
            number: 1,
            prev_hash: GENESIS_PREV_HASH.to_string(),
        };
        info!(
            pending = pool.len(),
            batch_size,
            hash = %self.config.hash,
            mode = %self.config.mode,
            "pipeline started"
        );

        let mut blocks = Vec::new();
        let mut batch = Vec::with_capacity(batch_size);
        let mut dropped = 0usize;
        for tx in selector::order(&pool) {
            if !ledger.try_transfer(&tx.from, &tx.to, tx.amount) {
                dropped += 1;
                continue;
            }
            batch.push(tx);
            if batch.len() == batch_size {
                let block = sealer.seal(std::mem::take(&mut batch), &mut ledger)?;
                emit(&block)?;
                blocks.push(block);
            }
        }
        if !batch.is_empty() {
            let block = sealer.seal(batch, &mut ledger)?;
            emit(&block)?;
            blocks.push(block);
        }

        debug!(dropped, "transactions skipped for insufficient balance");
        info!(blocks = blocks.len(), "pipeline finished");
        Ok(Chain { blocks, ledger })
    }
}
