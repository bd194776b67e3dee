//! 検出率評価スクリプト
//!
//! レインボーテーブルの検出率と検索速度を計測する。
//! サンプルはキースペース全体から一様抽出する。
//!
//! ## 実行方法
//!
//! ```powershell
//! cargo run --example detection_rate -p hashlab-rainbow --release
//! ```
//!
//! ## 出力例
//!
//! ```text
//! [Detection Rate Evaluation]
//! Params: lowercase, max_length=4, md5, chain_length=100, chain_count=500
//! Keyspace: 475,254
//! Estimated coverage: 10.52%
//!
//! Detection rate: 17/200 (8.5%)
//! Average time per query: 12.3ms
//! ```

use std::time::Instant;

use hashlab_rainbow::domain::coverage::estimated_coverage;
use hashlab_rainbow::{GenerationParameters, build_table, compute_hash, lookup_in_table};
use rand::Rng;

const SAMPLE_COUNT: usize = 200;

fn main() {
    let params = GenerationParameters::default();
    let keyspace = params.keyspace();

    println!("[Detection Rate Evaluation]");
    println!(
        "Params: {}, max_length={}, {}, chain_length={}, chain_count={}",
        params.charset,
        params.max_length,
        params.hash_algorithm,
        params.chain_length,
        params.chain_count
    );
    println!("Keyspace: {}", keyspace.total());
    println!(
        "Estimated coverage: {:.2}%",
        estimated_coverage(params.chain_count, params.chain_length, keyspace.total())
    );
    println!();

    let start = Instant::now();
    let table = build_table(&params);
    println!(
        "Generated {} chains in {:.2}s",
        table.len(),
        start.elapsed().as_secs_f64()
    );

    // Sample passwords uniformly from the keyspace
    let mut rng = rand::thread_rng();
    let samples: Vec<String> = (0..SAMPLE_COUNT)
        .map(|_| keyspace.decode(rng.gen_range(0..keyspace.total())))
        .collect();

    let mut detected = 0;
    let start = Instant::now();

    for (i, password) in samples.iter().enumerate() {
        let target = compute_hash(params.hash_algorithm, password);
        let result = lookup_in_table(&target, &table);

        if result.found {
            detected += 1;
        }

        if (i + 1) % 50 == 0 {
            println!("Progress: {}/{}", i + 1, SAMPLE_COUNT);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!(
        "Detection rate: {}/{} ({:.1}%)",
        detected,
        SAMPLE_COUNT,
        detected as f64 / SAMPLE_COUNT as f64 * 100.0
    );
    println!("Total time: {:.2}s", elapsed.as_secs_f64());
    println!(
        "Average time per query: {:.1}ms",
        elapsed.as_secs_f64() * 1000.0 / SAMPLE_COUNT as f64
    );
}
