//! Crack workflow implementation
//!
//! This module recovers a plaintext from a target hash by assuming the
//! hash sits at every chain position in turn, walking forward to the chain
//! end and checking the table for that endpoint.

use crate::app::generator::RainbowTable;
use crate::domain::chain::{ChainEntry, verify_chain};
use crate::domain::hash::{HashAlgorithm, compute_hash, reduce_hash};
use crate::domain::keyspace::Keyspace;
use serde::Serialize;

/// Outcome of a table lookup
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CrackResult {
    pub found: bool,
    /// Recovered plaintext
    pub password: Option<String>,
    /// Chain the plaintext was found in
    pub chain_index: Option<usize>,
    /// Position of the plaintext within its chain
    pub step_in_chain: Option<usize>,
    /// Table entries compared against candidate endpoints
    pub chains_searched: u64,
}

impl CrackResult {
    fn not_found(chains_searched: u64) -> Self {
        Self {
            chains_searched,
            ..Self::default()
        }
    }
}

/// Look up a target hash in a table
///
/// Positions are tried from the chain end backwards, so the cheapest
/// candidates are checked first. Every endpoint match is verified by
/// re-walking the chain; unverified matches are false alarms and the search
/// continues.
///
/// # Arguments
/// * `target_hash` - Hex digest to crack (surrounding whitespace and case are ignored)
/// * `table` - The rainbow table to search
///
/// # Returns
/// The first verified match, or `found: false` with the number of entries scanned
pub fn lookup_in_table(target_hash: &str, table: &RainbowTable) -> CrackResult {
    // compute_hash emits lowercase hex, so verification compares against that form
    let target = target_hash.trim().to_ascii_lowercase();
    let target_hash = target.as_str();
    let params = table.params();
    let keyspace = table.keyspace();
    let chain_length = params.chain_length;
    let mut chains_searched = 0u64;

    for step_from_end in 0..chain_length {
        let position = chain_length - 1 - step_from_end;

        // Step 1: Walk from the assumed position to the chain end
        let candidate_end = endpoint_from(
            target_hash,
            position,
            params.hash_algorithm,
            chain_length,
            &keyspace,
        );

        // Step 2: Scan the table for that endpoint
        for entry in table.entries() {
            chains_searched += 1;
            if entry.end != candidate_end {
                continue;
            }

            // Step 3: Verify the candidate chain
            if let Some(found) = verify_entry(entry, target_hash, table) {
                tracing::debug!(
                    chain_index = entry.chain_index,
                    position = found.1,
                    "verified endpoint match"
                );
                return CrackResult {
                    found: true,
                    password: Some(found.0),
                    chain_index: Some(entry.chain_index),
                    step_in_chain: Some(found.1),
                    chains_searched,
                };
            }
        }
    }

    CrackResult::not_found(chains_searched)
}

/// Compute the chain end reached when `target_hash` is the digest at `position`
fn endpoint_from(
    target_hash: &str,
    position: usize,
    algorithm: HashAlgorithm,
    chain_length: usize,
    keyspace: &Keyspace,
) -> String {
    let mut candidate = reduce_hash(target_hash, position, keyspace);
    for n in position + 1..chain_length {
        let hash = compute_hash(algorithm, &candidate);
        candidate = reduce_hash(&hash, n, keyspace);
    }
    candidate
}

fn verify_entry(
    entry: &ChainEntry,
    target_hash: &str,
    table: &RainbowTable,
) -> Option<(String, usize)> {
    let params = table.params();
    verify_chain(
        &entry.start,
        target_hash,
        params.hash_algorithm,
        params.chain_length,
        &table.keyspace(),
    )
    .map(|m| (m.password, m.position))
}
