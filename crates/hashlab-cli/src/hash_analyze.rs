//! Hash analysis CLI
//!
//! Usage: hash_analyze <PASSWORD> [--json]
//!        hash_analyze --identify <DIGEST> [--json]
//!
//! Example:
//!   hash_analyze password
//!   hash_analyze --identify 5f4dcc3b5aa765d61d8327deb882cf99

mod logging;

use anyhow::Result;
use clap::Parser;
use hashlab_rainbow::{HashAlgorithm, RainbowEngine};
use serde_json::json;

#[derive(Parser, Debug)]
#[command(about = "Hash a password under every algorithm, or guess a digest's algorithm")]
struct Cli {
    /// Password to hash and rate
    #[arg(required_unless_present = "identify")]
    password: Option<String>,

    /// Guess which algorithms could have produced this digest
    #[arg(long, value_name = "DIGEST", conflicts_with = "password")]
    identify: Option<String>,

    /// Print the result as JSON
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

    if let Some(digest) = &cli.identify {
        let candidates = engine.identify_hash(digest);
        tracing::debug!(
            length = digest.trim().len(),
            matches = candidates.len(),
            "identified digest"
        );
        return print_identification(digest.trim(), &candidates, cli.json);
    }

    let password = cli.password.unwrap_or_default();
    let analysis = engine.analyze_password(&password);

    if cli.json {
        let value = json!({
            "input": password,
            "input_length": password.chars().count(),
            "results": analysis,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "{:<10} {:<12} {:<8} {:<20} Hash",
        "Algorithm", "Status", "Rainbow", "Brute force"
    );
    for entry in &analysis {
        println!(
            "{:<10} {:<12} {:<8} {:<20} {}",
            entry.profile.algorithm.name(),
            format!("{:?}", entry.profile.status),
            if entry.profile.rainbow_vulnerable { "yes" } else { "no" },
            entry.crack_estimate.human_readable,
            entry.hash
        );
    }

    Ok(())
}

fn print_identification(digest: &str, candidates: &[HashAlgorithm], json: bool) -> Result<()> {
    if json {
        let value = json!({
            "hash": digest,
            "length": digest.len(),
            "is_hex": !digest.is_empty() && digest.bytes().all(|c| c.is_ascii_hexdigit()),
            "possible_algorithms": candidates,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if candidates.is_empty() {
        println!("Unknown hash format.");
        return Ok(());
    }

    let names: Vec<&str> = candidates.iter().map(|a| a.name()).collect();
    println!("Possible algorithms: {}", names.join(", "));
    println!("Identification by length is probabilistic, not definitive.");

    Ok(())
}
