//! Empirical measurement of rainbow table coverage
//!
//! Generates tables with increasing chain counts and compares the measured
//! coverage with the merge-free estimate, showing where chain merges start
//! to waste work.
//!
//! Usage: cargo run --example measure_coverage -p hashlab-rainbow --release -- [charset] [max_length] [chain_length]
//!
//! Example: cargo run --example measure_coverage -p hashlab-rainbow --release -- digits 5 200

use hashlab_rainbow::app::coverage::measure_coverage;
use hashlab_rainbow::{
    DEFAULT_CHAIN_LENGTH, DEFAULT_CHARSET, DEFAULT_MAX_LENGTH, GenerationParameters, RainbowError,
    build_table,
};
use std::env;
use std::time::Instant;

const CHAIN_COUNTS: [usize; 5] = [100, 250, 500, 1000, 2000];

fn main() {
    let args: Vec<String> = env::args().collect();
    let charset = args.get(1).map(String::as_str).unwrap_or(DEFAULT_CHARSET);
    let max_length = parse_arg(&args, 2, DEFAULT_MAX_LENGTH);
    let chain_length = parse_arg(&args, 3, DEFAULT_CHAIN_LENGTH);

    let base = match GenerationParameters::new(charset, max_length, "md5", chain_length, 0) {
        Ok(params) => params,
        Err(RainbowError::MaxLengthExceeded { max, .. }) => {
            eprintln!("Error: max_length must be at most {}", max);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("==========================================================================");
    println!("Empirical Coverage Measurement");
    println!("==========================================================================");
    println!();
    println!("Parameters:");
    println!("  Charset: {}", base.charset);
    println!("  Max length: {}", base.max_length);
    println!("  Chain length (t): {}", base.chain_length);
    println!("  Keyspace (N): {}", base.keyspace().total());
    println!();
    println!(
        "{:>8} {:>12} {:>12} {:>12} {:>10}",
        "m", "reachable", "measured", "estimated", "time"
    );

    for chain_count in CHAIN_COUNTS {
        let params = base.with_chain_count(chain_count);

        let start = Instant::now();
        let table = build_table(&params);
        let report = measure_coverage(&table);
        let elapsed = start.elapsed();

        println!(
            "{:>8} {:>12} {:>11.2}% {:>11.2}% {:>9.2}s",
            chain_count,
            report.reachable,
            report.coverage,
            report.estimated_coverage,
            elapsed.as_secs_f64()
        );
    }
}

fn parse_arg(args: &[String], index: usize, default: usize) -> usize {
    match args.get(index) {
        Some(value) => value.parse().unwrap_or_else(|_| {
            eprintln!("Error: invalid number '{}'", value);
            std::process::exit(1);
        }),
        None => default,
    }
}
