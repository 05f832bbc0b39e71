use crate::{
    constants::SEALING_FACTOR_COUNT,
    error::{ChainError, Result},
};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Miner {
    id: String,
    computation_score: i64,
    sealing_factors: [i64; SEALING_FACTOR_COUNT],
}

impl Miner {
    /// The id is stored upper-cased; that is the form used for rewards and output.
    pub fn new(
        id: &str,
        computation_score: i64,
        sealing_factors: [i64; SEALING_FACTOR_COUNT],
    ) -> Self {
        Self {
            id: id.to_uppercase(),
            computation_score,
            sealing_factors,
        }
    }

    pub fn from_factors(id: &str, computation_score: i64, factors: &[i64]) -> Result<Self> {
        let sealing_factors: [i64; SEALING_FACTOR_COUNT] =
            factors
                .try_into()
                .map_err(|_| ChainError::InvalidSealingFactors {
                    miner: id.to_string(),
                    count: factors.len(),
                    expected: SEALING_FACTOR_COUNT,
                })?;
        Ok(Self::new(id, computation_score, sealing_factors))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sealing_factors(&self) -> &[i64; SEALING_FACTOR_COUNT] {
        &self.sealing_factors
    }

    /// `computation_score * sealing_factors[block_number % 8]`, widened so it cannot overflow.
    pub fn sealing_score(&self, block_number: u64) -> i128 {
        let slot = (block_number % SEALING_FACTOR_COUNT as u64) as usize;
        i128::from(self.computation_score) * i128::from(self.sealing_factors[slot])
    }
}

/// Miners in registration order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MinerRegistry {
    miners: Vec<Miner>,
}

impl MinerRegistry {
    pub fn new(miners: Vec<Miner>) -> Self {
        Self { miners }
    }

    pub fn miners(&self) -> &[Miner] {
        &self.miners
    }

    pub fn is_empty(&self) -> bool {
        self.miners.is_empty()
    }

    /// Highest sealing score wins; on a tie the earliest registered miner is kept.
    pub fn select(&self, block_number: u64) -> Result<&Miner> {
        let mut best: Option<(&Miner, i128)> = None;
        for miner in &self.miners {
            let score = miner.sealing_score(block_number);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((miner, score));
            }
        }
        best.map(|(miner, _)| miner)
            .ok_or(ChainError::EmptyMinerRegistry {
                block: block_number,
            })
    }
}
