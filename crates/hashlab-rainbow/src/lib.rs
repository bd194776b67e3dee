//! hashlab-rainbow - Rainbow table engine for password-hashing weakness demos
//!
//! This crate provides functionality to:
//! - Hash passwords with common (unsalted) digest algorithms
//! - Generate rainbow tables over small charset/length keyspaces
//! - Crack a target hash by walking candidate chains, with full-chain verification
//! - Visualize the hash → reduce steps of a single chain
//! - Measure how much of the keyspace a table really covers
//! - Identify a digest's algorithm and estimate brute-force cost per algorithm

pub mod constants;
pub mod error;
pub mod domain;
pub mod infra;
pub mod app;

// Re-export commonly used types
pub use app::coverage::CoverageReport;
pub use app::engine::{CrackReport, HashAnalysis, RainbowEngine, TableReport};
pub use app::generator::{RainbowTable, build_table, build_table_with_rng};
pub use app::searcher::{CrackResult, lookup_in_table};
pub use constants::*;
pub use domain::chain::{ChainEntry, ChainTrace, ChainTraceStep};
pub use domain::charset::Charset;
pub use domain::hash::{HashAlgorithm, compute_hash, hash_password, reduce_hash};
pub use domain::keyspace::Keyspace;
pub use domain::params::GenerationParameters;
pub use domain::strength::{
    AlgorithmProfile, CrackTimeEstimate, SecurityStatus, estimate_crack_time,
};
pub use error::{RainbowError, Result};
pub use infra::table_cache::{CacheStatus, TableCache};
