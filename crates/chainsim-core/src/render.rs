use crate::{ledger::Ledger, Block, Transaction};

/// `["from", "to", amount, incentive]`
pub fn transaction(t: &Transaction) -> String {
    format!("[\"{}\", \"{}\", {}, {}]", t.from, t.to, t.amount, t.incentive)
}

pub fn transactions(txs: &[Transaction]) -> String {
    let items: Vec<String> = txs.iter().map(transaction).collect();
    format!("[{}]", items.join(", "))
}

/// Newline-separated sections: number, hash, transactions, Merkle root,
/// then `nonce MINER` for sealed blocks. No trailing newline.
pub fn block(block: &Block) -> String {
    let mut out = format!(
        "{}\n{}\n{}\n{}",
        block.number,
        block.hash,
        transactions(&block.txs),
        block.merkle_root
    );
    if let Some(seal) = &block.seal {
        out.push_str(&format!("\n{} {}", seal.nonce, seal.miner.id()));
    }
    out
}

/// One `ID BALANCE` line per account, ordered by id.
pub fn balances(ledger: &Ledger) -> String {
    ledger
        .iter()
        .map(|(id, balance)| format!("{id} {balance}"))
        .collect::<Vec<_>>()
        .join("\n")
}
