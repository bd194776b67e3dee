//! Table generation workflow
//!
//! This module provides functions for generating rainbow tables.

use crate::domain::chain::{ChainEntry, compute_chain};
use crate::domain::keyspace::Keyspace;
use crate::domain::params::GenerationParameters;
use rand::Rng;
use rayon::prelude::*;
use serde::Serialize;

/// A generated rainbow table
///
/// Holds the parameters it was built under together with the chain
/// entries in generation order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RainbowTable {
    params: GenerationParameters,
    entries: Vec<ChainEntry>,
}

impl RainbowTable {
    pub fn new(params: GenerationParameters, entries: Vec<ChainEntry>) -> Self {
        Self { params, entries }
    }

    /// Parameters the table was generated under
    pub fn params(&self) -> &GenerationParameters {
        &self.params
    }

    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    /// Number of chains
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keyspace(&self) -> Keyspace {
        self.params.keyspace()
    }
}

/// Generate a rainbow table with the thread-local RNG
pub fn build_table(params: &GenerationParameters) -> RainbowTable {
    build_table_with_rng(params, &mut rand::thread_rng())
}

/// Generate a rainbow table
///
/// Start passwords are drawn from `rng` in chain order, so a seeded RNG
/// reproduces the table exactly. Chain walks run in parallel using rayon.
///
/// # Arguments
/// * `params` - Table parameters
/// * `rng` - Source of the random start passwords
///
/// # Returns
/// A table of `chain_count` chains, or an empty table for degenerate parameters
pub fn build_table_with_rng<R: Rng + ?Sized>(
    params: &GenerationParameters,
    rng: &mut R,
) -> RainbowTable {
    if params.is_degenerate() {
        tracing::debug!(?params, "degenerate parameters, generating empty table");
        return RainbowTable::new(*params, Vec::new());
    }

    let keyspace = params.keyspace();
    let starts: Vec<String> = (0..params.chain_count)
        .map(|_| random_password(rng, &keyspace))
        .collect();

    tracing::debug!(
        chain_count = params.chain_count,
        chain_length = params.chain_length,
        algorithm = %params.hash_algorithm,
        "walking chains"
    );

    let entries = generate_chains(starts, params, &keyspace);
    RainbowTable::new(*params, entries)
}

/// Walk chains from the given start passwords
///
/// Entry `i` of the result is the chain starting at `starts[i]`.
pub fn generate_chains(
    starts: Vec<String>,
    params: &GenerationParameters,
    keyspace: &Keyspace,
) -> Vec<ChainEntry> {
    starts
        .into_par_iter()
        .enumerate()
        .map(|(chain_index, start)| {
            compute_chain(
                start,
                chain_index,
                params.hash_algorithm,
                params.chain_length,
                keyspace,
            )
        })
        .collect()
}

/// Draw a password of uniform random length in `1..=max_length`
fn random_password<R: Rng + ?Sized>(rng: &mut R, keyspace: &Keyspace) -> String {
    let chars = keyspace.charset().chars();
    let length = rng.gen_range(1..=keyspace.max_length());

    (0..length)
        .map(|_| chars[rng.gen_range(0..chars.len())] as char)
        .collect()
}
