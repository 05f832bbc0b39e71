use crate::{
    config::InputLayout,
    constants::SEALING_FACTOR_COUNT,
    error::{ChainError, Result},
    miner::Miner,
    Transaction,
};
use std::str::FromStr;
use tracing::warn;

/// Everything one run consumes, in the order it appears in the input text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimulationInput {
    pub accounts: Vec<(String, i64)>,
    pub pool: Vec<Transaction>,
    pub block_reward: Option<i64>,
    pub miners: Vec<Miner>,
}

/// Line cursor that keeps 1-based line numbers for error messages.
struct Records<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

struct Record<'a> {
    line: usize,
    fields: Vec<&'a str>,
}

impl<'a> Records<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
        }
    }

    fn next(&mut self, expected: &'static str) -> Result<Record<'a>> {
        let (idx, line) = self
            .lines
            .next()
            .ok_or(ChainError::UnexpectedEof { expected })?;
        Ok(Record {
            line: idx + 1,
            fields: line.split_whitespace().collect(),
        })
    }

    fn count(&mut self, expected: &'static str) -> Result<usize> {
        let record = self.next(expected)?;
        record.expect_len(1, expected)?;
        record.number(0, expected)
    }

    fn has_more(&self) -> bool {
        self.lines.clone().any(|(_, line)| !line.trim().is_empty())
    }
}

impl Record<'_> {
    fn expect_len(&self, len: usize, what: &str) -> Result<()> {
        if self.fields.len() != len {
            return Err(ChainError::parse(
                self.line,
                format!("{what}: expected {len} fields, found {}", self.fields.len()),
            ));
        }
        Ok(())
    }

    fn number<T: FromStr>(&self, idx: usize, what: &str) -> Result<T> {
        let raw = self.fields[idx];
        raw.parse()
            .map_err(|_| ChainError::parse(self.line, format!("{what}: `{raw}` is not an integer")))
    }

    fn non_negative(&self, idx: usize, what: &str) -> Result<i64> {
        let value: i64 = self.number(idx, what)?;
        if value < 0 {
            return Err(ChainError::parse(
                self.line,
                format!("{what} must not be negative, got {value}"),
            ));
        }
        Ok(value)
    }
}

/// Parses the line-oriented input:
///
/// ```text
/// <account count>
/// <id> <balance>            (per account)
/// <transaction count>
/// <from> <to> <amount> <incentive>
/// <block reward>            (only if layout.block_reward)
/// <miner count>             (only if layout.miners)
/// <id> <score> <f0> .. <f7>
/// ```
///
/// Any missing or malformed field aborts the whole parse. Counts are trusted
/// only as loop bounds; nothing is allocated up front from them.
pub fn parse(text: &str, layout: &InputLayout) -> Result<SimulationInput> {
    let mut records = Records::new(text);

    let n_accounts = records.count("account count")?;
    let mut accounts: Vec<(String, i64)> = Vec::new();
    for _ in 0..n_accounts {
        let r = records.next("account record")?;
        r.expect_len(2, "account record")?;
        accounts.push((r.fields[0].to_string(), r.non_negative(1, "balance")?));
    }

    let n_txs = records.count("transaction count")?;
    let mut pool = Vec::new();
    for _ in 0..n_txs {
        let r = records.next("transaction record")?;
        r.expect_len(4, "transaction record")?;
        pool.push(Transaction::new(
            r.fields[0],
            r.fields[1],
            r.non_negative(2, "amount")?,
            r.number(3, "incentive")?,
        ));
    }

    let block_reward = if layout.block_reward {
        let r = records.next("block reward")?;
        r.expect_len(1, "block reward")?;
        Some(r.non_negative(0, "block reward")?)
    } else {
        None
    };

    let mut miners = Vec::new();
    if layout.miners {
        let n_miners = records.count("miner count")?;
        for _ in 0..n_miners {
            let r = records.next("miner record")?;
            r.expect_len(2 + SEALING_FACTOR_COUNT, "miner record")?;
            let factors = (2..2 + SEALING_FACTOR_COUNT)
                .map(|i| r.number(i, "sealing factor"))
                .collect::<Result<Vec<i64>>>()?;
            miners.push(Miner::from_factors(
                r.fields[0],
                r.number(1, "computation score")?,
                &factors,
            )?);
        }
    }

    if records.has_more() {
        warn!("ignoring trailing input after the last expected section");
    }

    Ok(SimulationInput {
        accounts,
        pool,
        block_reward,
        miners,
    })
}
