//! End-to-end crack tests
//!
//! Generates a small table once and checks the lookup against an
//! independent enumeration of the passwords the table reaches.
//!
//! ## Design
//!
//! The shared table is built from a seeded `StdRng` via `OnceLock`, so every
//! test sees the same chains and results are reproducible across runs.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use hashlab_rainbow::app::coverage::build_reachable_set;
use hashlab_rainbow::domain::coverage::ReachableSet;
use hashlab_rainbow::{
    Charset, GenerationParameters, HashAlgorithm, RainbowEngine, RainbowTable, TableCache,
    build_table_with_rng, compute_hash, lookup_in_table,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// =============================================================================
// Constants
// =============================================================================

const SEED: u64 = 0x5EED;

fn cat_params() -> GenerationParameters {
    GenerationParameters::new("lowercase", 3, "md5", 20, 200).unwrap()
}

// =============================================================================
// Shared Test Table (generated once, used by all tests)
// =============================================================================

struct SharedTable {
    table: RainbowTable,
    reachable: ReachableSet,
}

static SHARED_TABLE: OnceLock<SharedTable> = OnceLock::new();

fn get_shared_table() -> &'static SharedTable {
    SHARED_TABLE.get_or_init(|| {
        let table = build_table_with_rng(&cat_params(), &mut StdRng::seed_from_u64(SEED));
        let reachable = build_reachable_set(&table);
        SharedTable { table, reachable }
    })
}

// =============================================================================
// Scenario tests
// =============================================================================

#[test]
fn test_cat_scenario() {
    let target = compute_hash(HashAlgorithm::Md5, "cat");
    let mut hits = 0;

    for seed in 0..200u64 {
        let table = build_table_with_rng(&cat_params(), &mut StdRng::seed_from_u64(seed));
        let reachable = build_reachable_set(&table);
        let result = lookup_in_table(&target, &table);

        assert_eq!(
            result.found,
            reachable.contains("cat"),
            "seed {}: found disagrees with reachability",
            seed
        );
        if result.found {
            hits += 1;
            assert_eq!(result.password.as_deref(), Some("cat"), "seed {}", seed);
            assert!(result.chain_index.unwrap() < 200);
            assert!(result.step_in_chain.unwrap() < 20);
        }
    }

    // About one table in ten reaches "cat"
    assert!(hits > 0, "no seeded table cracked cat");
}

#[test]
fn test_found_iff_reachable() {
    let shared = get_shared_table();
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    let keyspace = shared.table.keyspace();

    for _ in 0..200 {
        let password = keyspace.decode(rng.gen_range(0..keyspace.total()));
        let target = compute_hash(HashAlgorithm::Md5, &password);
        let result = lookup_in_table(&target, &shared.table);

        assert_eq!(
            result.found,
            shared.reachable.contains(&password),
            "mismatch for {}",
            password
        );
        if result.found {
            assert_eq!(result.password.as_deref(), Some(password.as_str()));
        }
    }
}

#[test]
fn test_every_chain_start_is_cracked() {
    let shared = get_shared_table();

    for entry in shared.table.entries().iter().take(25) {
        let target = compute_hash(HashAlgorithm::Md5, &entry.start);
        let result = lookup_in_table(&target, &shared.table);
        assert!(result.found, "start {} not cracked", entry.start);
        assert_eq!(result.password.as_deref(), Some(entry.start.as_str()));
    }
}

#[test]
fn test_unreachable_digest_scans_whole_table() {
    let shared = get_shared_table();
    let result = lookup_in_table("0123456789abcdef0123456789abcdef", &shared.table);

    assert!(!result.found);
    assert_eq!(result.chains_searched, 20 * 200);
}

// =============================================================================
// Engine and cache tests
// =============================================================================

#[test]
fn test_engine_cache_reuse() {
    let cache = Arc::new(TableCache::new());
    let engine = RainbowEngine::with_cache(Arc::clone(&cache));
    let target = compute_hash(HashAlgorithm::Md5, "cat");

    let first = engine
        .crack_with_rng(&target, &cat_params(), &mut StdRng::seed_from_u64(SEED))
        .unwrap();
    let table = cache.get(&cat_params()).unwrap();
    let second = engine.crack(&target, &cat_params()).unwrap();

    assert!(!first.cache_hit);
    assert!(second.cache_hit);
    assert_eq!(second.table_generation_time, Duration::ZERO);
    assert_eq!(second.total_time, second.lookup_time);
    assert!(Arc::ptr_eq(&table, &cache.get(&cat_params()).unwrap()));

    // Same seed as the shared table, so the outcome matches it
    let shared = lookup_in_table(&target, &get_shared_table().table);
    assert_eq!(first.result, shared);
    assert_eq!(second.result, shared);
}

#[test]
fn test_engine_parameter_change_regenerates() {
    let engine = RainbowEngine::new();
    let target = compute_hash(HashAlgorithm::Md5, "cat");

    engine.crack(&target, &cat_params()).unwrap();
    let other = cat_params().with_hash_algorithm(HashAlgorithm::Sha1);
    let report = engine.crack(&target, &other).unwrap();

    assert!(!report.cache_hit);
    assert_eq!(engine.cache().cached_params(), Some(other));
}

#[test]
fn test_engine_unknown_charset_shares_cache_entry() {
    let engine = RainbowEngine::new();
    let target = compute_hash(HashAlgorithm::Md5, "cat");
    let bogus = GenerationParameters::new("bogus", 3, "md5", 20, 200).unwrap();
    assert_eq!(bogus.charset, Charset::Lowercase);

    engine.crack(&target, &cat_params()).unwrap();
    assert!(engine.crack(&target, &bogus).unwrap().cache_hit);
}

#[test]
fn test_engine_empty_table() {
    let engine = RainbowEngine::new();
    let target = compute_hash(HashAlgorithm::Md5, "cat");
    let report = engine
        .crack(&target, &cat_params().with_chain_count(0))
        .unwrap();

    assert!(!report.result.found);
    assert_eq!(report.result.chains_searched, 0);
    assert_eq!(report.total_chains, 0);
}

#[test]
fn test_ntlm_table() {
    let params = GenerationParameters::new("digits", 3, "NTLM", 15, 60).unwrap();
    let table = build_table_with_rng(&params, &mut StdRng::seed_from_u64(SEED));
    let entry = &table.entries()[0];

    let target = compute_hash(HashAlgorithm::Ntlm, &entry.start);
    let result = lookup_in_table(&target, &table);
    assert!(result.found);
    assert_eq!(result.password.as_deref(), Some(entry.start.as_str()));
}
