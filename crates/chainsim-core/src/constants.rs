pub const HASH_SIZE: usize = 32;
pub const HASH_HEX_SIZE: usize = HASH_SIZE * 2;
pub const DEFAULT_BATCH_SIZE: usize = 4;
pub const SEALING_FACTOR_COUNT: usize = 8;
pub const GENESIS_PREV_HASH: &str = "0";
pub const POW_TARGET_SUFFIX: char = '0';
