//! Chain visualization CLI
//!
//! Usage: rainbow_chain [START] [--hash <ALGO>] [--chain-length <N>]
//!                      [--charset <NAME>] [--max-length <N>] [--json]
//!
//! Example:
//!   rainbow_chain test --chain-length 5

mod logging;

use anyhow::Result;
use clap::Parser;
use hashlab_rainbow::{
    ChainTraceStep, DEFAULT_CHARSET, DEFAULT_HASH_ALGORITHM, DEFAULT_MAX_LENGTH,
    DEFAULT_VISUALIZER_CHAIN_LENGTH, DEFAULT_VISUALIZER_START, RainbowEngine,
};

#[derive(Parser, Debug)]
#[command(about = "Show every hash and reduction of a single chain")]
struct Cli {
    /// Starting password
    #[arg(default_value = DEFAULT_VISUALIZER_START)]
    start: String,

    /// Hash algorithm
    #[arg(long = "hash", default_value = DEFAULT_HASH_ALGORITHM)]
    hash_algorithm: String,

    /// Hash → reduce steps
    #[arg(long, default_value_t = DEFAULT_VISUALIZER_CHAIN_LENGTH)]
    chain_length: usize,

    /// Charset preset the reductions map into
    #[arg(long, default_value = DEFAULT_CHARSET)]
    charset: String,

    /// Maximum password length
    #[arg(long, default_value_t = DEFAULT_MAX_LENGTH)]
    max_length: usize,

    /// Print the trace as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    logging::init_tracing();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let engine = RainbowEngine::new();
    let trace = engine.visualize_chain(
        &cli.start,
        &cli.hash_algorithm,
        cli.chain_length,
        &cli.charset,
        cli.max_length,
    )?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
        return Ok(());
    }

    for step in &trace.steps {
        match step {
            ChainTraceStep::Start { step, password } => {
                println!("[{:>3}] start   {}", step, password)
            }
            ChainTraceStep::Hash { step, hash } => println!("[{:>3}] hash    {}", step, hash),
            ChainTraceStep::Reduce {
                step,
                password,
                reduction_index,
            } => println!("[{:>3}] R{:<6} {}", step, reduction_index, password),
        }
    }
    println!();
    println!(
        "{} -> {} ({} steps)",
        trace.start, trace.end, trace.chain_length
    );

    Ok(())
}
