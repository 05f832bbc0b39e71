use anyhow::{Context, Result};
use chainsim_core::{
    input, render, ChainConfig, HashAlgorithm, Mode, OddLeafRule, Pipeline, RewardSource,
};
use clap::Parser;
use std::{
    fs,
    io::{self, IsTerminal, Read, Write},
    path::PathBuf,
    process::ExitCode,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "chainsim")]
#[command(about = "Seal pending transactions into hash-linked blocks")]
struct Args {
    /// Input file; reads stdin when omitted or `-`
    input: Option<PathBuf>,

    /// JSON file with a ChainConfig; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Applied transactions per block
    #[arg(long)]
    batch_size: Option<usize>,

    /// sha3-256 or sha256
    #[arg(long)]
    hash: Option<HashAlgorithm>,

    /// carry-forward or rehash
    #[arg(long)]
    odd_leaf: Option<OddLeafRule>,

    /// full (miners, nonce, reward) or basic
    #[arg(long)]
    mode: Option<Mode>,

    /// `input` (reward line in the input), `none`, or a fixed amount
    #[arg(long)]
    reward: Option<RewardSource>,

    /// Search nonces on all cores
    #[arg(long)]
    parallel: bool,

    /// Print final balances after the blocks
    #[arg(long)]
    balances: bool,

    /// Emit blocks as a JSON array instead of the text format; with
    /// `--balances`, one object holding both
    #[arg(long)]
    json: bool,
}

fn load_config(args: &Args) -> Result<ChainConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            ChainConfig::from_json(&text)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => ChainConfig::default(),
    };
    if let Some(k) = args.batch_size {
        config.batch_size = k;
    }
    if let Some(hash) = args.hash {
        config.hash = hash;
    }
    if let Some(rule) = args.odd_leaf {
        config.odd_leaf = rule;
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(reward) = args.reward {
        config.block_reward = reward;
    }
    if args.parallel {
        config.parallel_nonce_search = true;
    }
    config.validate()?;
    Ok(config)
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => {
            fs::read_to_string(p).with_context(|| format!("reading input {}", p.display()))
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading input from stdin")?;
            Ok(text)
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    info!(?config, "configuration loaded");
    let text = read_input(args.input.as_ref())?;
    let sim_input = input::parse(&text, &config.input_layout()).context("parsing input")?;
    let pipeline = Pipeline::new(config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let chain = pipeline.run(sim_input)?;
        if args.balances {
            let doc = serde_json::json!({
                "blocks": chain.blocks,
                "balances": chain.ledger,
            });
            serde_json::to_writer_pretty(&mut out, &doc)?;
        } else {
            serde_json::to_writer_pretty(&mut out, &chain.blocks)?;
        }
        writeln!(out)?;
        return Ok(());
    }

    let chain = pipeline.run_with(sim_input, |block| {
        writeln!(out, "{}", render::block(block))?;
        out.flush()
    })?;
    if args.balances && !chain.ledger.is_empty() {
        writeln!(out, "{}", render::balances(&chain.ledger))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
