use crate::{constants::POW_TARGET_SUFFIX, hash::HashAlgorithm};
use rayon::prelude::*;
use tracing::debug;

/// True when `hash(block_hash ++ nonce)` ends in the target digit.
pub fn nonce_satisfies(hash: HashAlgorithm, block_hash: &str, nonce: u64) -> bool {
    hash.hash_str(&format!("{block_hash}{nonce}"))
        .ends_with(POW_TARGET_SUFFIX)
}

/// Smallest nonce satisfying the predicate, counting up from 0.
///
/// There is no upper bound: with a uniform digest each probe succeeds with
/// probability 1/16, so the loop ends almost surely.
pub fn find_nonce(hash: HashAlgorithm, block_hash: &str) -> u64 {
    let mut nonce = 0u64;
    while !nonce_satisfies(hash, block_hash, nonce) {
        nonce += 1;
    }
    debug!(nonce, block_hash, "nonce found");
    nonce
}

/// Same result as [`find_nonce`], with probes spread over the rayon pool.
/// `find_first` keeps the lowest satisfying nonce, not just any match.
pub fn find_nonce_parallel(hash: HashAlgorithm, block_hash: &str) -> u64 {
    let nonce = (0u64..u64::MAX)
        .into_par_iter()
        .find_first(|nonce| nonce_satisfies(hash, block_hash, *nonce))
        .expect("nonce space exhausted (practically impossible)");
    debug!(nonce, block_hash, "nonce found (parallel)");
    nonce
}
