use crate::{config::OddLeafRule, hash::HashAlgorithm, Transaction};

/// Folds the batch's commitment hashes into a single root, pairing
/// neighbours left to right. Leaf order matters.
pub fn merkle_root(txs: &[Transaction], hash: HashAlgorithm, odd_leaf: OddLeafRule) -> String {
    let leaves = txs.iter().map(|t| t.commitment_hash(hash)).collect();
    merkle_root_from_hashes(leaves, hash, odd_leaf)
}

pub fn merkle_root_from_hashes(
    leaves: Vec<String>,
    hash: HashAlgorithm,
    odd_leaf: OddLeafRule,
) -> String {
    if leaves.is_empty() {
        return match odd_leaf {
            OddLeafRule::CarryForward => String::new(),
            OddLeafRule::Rehash => hash.hash(b""),
        };
    }
    let mut level = leaves;
    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len().div_ceil(2));
        for pair in level.chunks(2) {
            let node = match pair {
                [left, right] => {
                    let mut joined = String::with_capacity(left.len() + right.len());
                    joined.push_str(left);
                    joined.push_str(right);
                    hash.hash_str(&joined)
                }
                [single] => match odd_leaf {
                    OddLeafRule::CarryForward => single.clone(),
                    OddLeafRule::Rehash => hash.hash_str(single),
                },
                _ => unreachable!("chunks(2) yields one or two items"),
            };
            next.push(node);
        }
        level = next;
    }
    level.swap_remove(0)
}
