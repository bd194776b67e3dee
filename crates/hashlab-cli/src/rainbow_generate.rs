//! Rainbow table generation CLI
//!
//! Usage: rainbow_generate [--charset <NAME>] [--max-length <N>] [--hash <ALGO>]
//!                         [--chain-length <N>] [--chain-count <N>] [--seed <N>]
//!                         [--show-chains <N>] [--coverage] [--json]
//!
//! Example:
//!   rainbow_generate --charset digits --max-length 5 --chain-count 2000 --coverage

mod logging;
mod table_args;

use anyhow::Result;
use clap::Parser;
use hashlab_rainbow::RainbowEngine;
use hashlab_rainbow::app::coverage::measure_coverage;
use table_args::TableArgs;

#[derive(Parser, Debug)]
#[command(about = "Generate a rainbow table and report its estimated coverage")]
struct Cli {
    #[command(flatten)]
    table: TableArgs,

    /// Print the first N chains
    #[arg(long, default_value_t = 0)]
    show_chains: usize,

    /// Also enumerate every chain and report the measured coverage
    #[arg(long)]
    coverage: bool,

    /// Print the report as JSON
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
    let report = engine.generate_table_with_rng(&params, &mut cli.table.rng())?;
    let coverage = cli.coverage.then(|| measure_coverage(&report.table));

    if cli.json {
        let mut value = serde_json::to_value(&report)?;
        if let Some(coverage) = &coverage {
            value["measured_coverage"] = serde_json::to_value(coverage)?;
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("=== Rainbow Table ===");
    println!("Charset: {}", params.charset);
    println!("Max length: {}", params.max_length);
    println!("Hash: {}", params.hash_algorithm);
    println!("Chains: {}", report.table_size);
    println!("Chain length: {}", report.chain_length);
    println!(
        "Generation time: {:.3}s",
        report.generation_time.as_secs_f64()
    );
    println!("Keyspace: {}", report.total_keyspace);
    println!("Estimated coverage: {:.2}%", report.estimated_coverage);

    if let Some(coverage) = coverage {
        println!(
            "Measured coverage: {:.2}% ({} of {} passwords reachable)",
            coverage.coverage, coverage.reachable, coverage.total_keyspace
        );
    }

    if cli.show_chains > 0 {
        println!();
        for entry in report.table.entries().iter().take(cli.show_chains) {
            println!("#{:<6} {} -> {}", entry.chain_index, entry.start, entry.end);
        }
    }

    Ok(())
}
