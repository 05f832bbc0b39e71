use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChainError>;

/// Fatal conditions that abort a simulation run.
///
/// A transfer rejected for insufficient balance is not represented here:
/// the selector drops it silently.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("miner {miner} has {count} sealing factors, expected {expected}")]
    InvalidSealingFactors {
        miner: String,
        count: usize,
        expected: usize,
    },

    #[error("cannot select a miner for block {block}: registry is empty")]
    EmptyMinerRegistry { block: u64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to emit block: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration file: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}

impl ChainError {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        ChainError::Parse {
            line,
            reason: reason.into(),
        }
    }
}
