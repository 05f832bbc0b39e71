use chainsim_core::{
    input, ChainConfig, HashAlgorithm, Miner, SimulationInput, Transaction,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Four accounts, nine pending transfers (two unaffordable), a 50 reward
/// and three miners.
pub const SAMPLE_INPUT: &str = "\
4
alice 100
bob 40
carol 0
dave 75
9
alice bob 30 5
bob carol 50 5
dave alice 20 3
carol dave 10 7
alice carol 80 2
bob dave 15 3
dave bob 60 1
alice eve 5 0
miner1 alice 25 4
50
3
miner1 10 1 2 3 4 5 6 7 8
miner2 20 5 1 1 1 1 1 1 1
miner3 5 9 1 9 1 9 1 9 1
";

pub fn parse_with(config: &ChainConfig, text: &str) -> SimulationInput {
    input::parse(text, &config.input_layout()).expect("fixture should parse")
}

pub fn random_miners(rng: &mut StdRng, count: usize) -> Vec<Miner> {
    (0..count)
        .map(|i| {
            let mut factors = [0i64; 8];
            for f in factors.iter_mut() {
                *f = rng.gen_range(0..10);
            }
            Miner::new(&format!("miner{i}"), rng.gen_range(1..50), factors)
        })
        .collect()
}

/// Accounts `acct0..acctN` with random non-negative balances and a pool of
/// transfers between them, some of which cannot be covered.
pub fn random_input(seed: u64, accounts: usize, txs: usize) -> SimulationInput {
    let mut rng = StdRng::seed_from_u64(seed);
    let names: Vec<String> = (0..accounts).map(|i| format!("acct{i}")).collect();
    let accounts = names
        .iter()
        .map(|n| (n.clone(), rng.gen_range(0..200)))
        .collect();
    let pool = (0..txs)
        .map(|_| {
            let from = &names[rng.gen_range(0..names.len())];
            let to = &names[rng.gen_range(0..names.len())];
            Transaction::new(
                from.clone(),
                to.clone(),
                rng.gen_range(0..120),
                rng.gen_range(-2..6),
            )
        })
        .collect();
    let miners = random_miners(&mut rng, 3);
    SimulationInput {
        accounts,
        pool,
        block_reward: Some(rng.gen_range(0..30)),
        miners,
    }
}

pub fn all_algorithms() -> [HashAlgorithm; 2] {
    [HashAlgorithm::Sha3_256, HashAlgorithm::Sha256]
}
