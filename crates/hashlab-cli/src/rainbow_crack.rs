//! Rainbow table crack CLI
//!
//! Usage: rainbow_crack [HASH] [--password <TEXT>] [table options] [--json]
//!
//! With no hash and no password, reads hashes from stdin one per line. The
//! table generated for the first query is cached and reused by the following
//! ones as long as the parameters do not change.
//!
//! Example:
//!   rainbow_crack --password cat --max-length 3 --chain-length 20 --chain-count 200
//!   rainbow_crack d077f244def8a70e5ea758bd8352fcd8 --max-length 3

mod logging;
mod table_args;

use anyhow::{Context, Result, bail};
use clap::Parser;
use hashlab_rainbow::{CrackReport, GenerationParameters, RainbowEngine, compute_hash};
use rand::rngs::StdRng;
use std::io::{self, BufRead, Write};
use table_args::TableArgs;

#[derive(Parser, Debug)]
#[command(about = "Recover a password from its hash with a rainbow table")]
struct Cli {
    /// Target hash (hex)
    hash: Option<String>,

    /// Hash this password first and crack the result
    #[arg(long, conflicts_with = "hash")]
    password: Option<String>,

    #[command(flatten)]
    table: TableArgs,

    /// Print reports as JSON
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
    let params = cli.table.params()?;
    let engine = RainbowEngine::new();
    let mut rng = cli.table.rng();

    let target = match (&cli.hash, &cli.password) {
        (Some(hash), _) => Some(hash.clone()),
        (None, Some(password)) => {
            let hash = compute_hash(params.hash_algorithm, password);
            if !cli.json {
                println!("{}({}) = {}", params.hash_algorithm, password, hash);
            }
            Some(hash)
        }
        (None, None) => None,
    };

    match target {
        Some(hash) => {
            let report = engine.crack_with_rng(&hash, &params, &mut rng)?;
            print_report(&report, cli.json)
        }
        None => interactive(&engine, &params, &mut rng, cli.json),
    }
}

fn interactive(
    engine: &RainbowEngine,
    params: &GenerationParameters,
    rng: &mut StdRng,
    json: bool,
) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("\nEnter hash (or 'q' to quit): ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read input")?;
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            println!("Goodbye!");
            break;
        }

        if let Some(report) = crack_line(engine, params, rng, input) {
            print_report(&report, json)?;
        }
    }

    Ok(())
}

/// Crack one interactive query; bad input is logged and the loop goes on
fn crack_line(
    engine: &RainbowEngine,
    params: &GenerationParameters,
    rng: &mut StdRng,
    input: &str,
) -> Option<CrackReport> {
    match engine.crack_with_rng(input, params, rng) {
        Ok(report) => Some(report),
        Err(e) => {
            tracing::warn!(input, error = %e, "query rejected, please try again");
            None
        }
    }
}

fn print_report(report: &CrackReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let result = &report.result;
    if result.found {
        let (Some(password), Some(chain_index), Some(step)) =
            (&result.password, result.chain_index, result.step_in_chain)
        else {
            bail!("incomplete crack result");
        };
        println!("Found: {}", password);
        println!("  Chain: #{} (step {})", chain_index, step);
    } else {
        println!("Not found in table.");
    }

    println!("  Chains searched: {}", result.chains_searched);
    println!("  Table chains: {}", report.total_chains);
    if report.cache_hit {
        println!("  Table: cached");
    } else {
        println!(
            "  Table generation: {:.3}s",
            report.table_generation_time.as_secs_f64()
        );
    }
    println!("  Lookup: {:.3}s", report.lookup_time.as_secs_f64());
    println!("  Total: {:.3}s", report.total_time.as_secs_f64());

    Ok(())
}
