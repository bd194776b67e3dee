//! Measured coverage workflow
//!
//! This module enumerates every password the chains of a table hash and
//! compares the distinct count with the keyspace size.

use crate::app::generator::RainbowTable;
use crate::domain::chain::enumerate_chain_passwords;
use crate::domain::coverage::{ReachableSet, estimated_coverage};
use rayon::prelude::*;
use serde::Serialize;

/// Result of a coverage measurement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    /// Number of distinct passwords the table reaches
    pub reachable: u64,
    /// Number of passwords in the keyspace
    pub total_keyspace: u64,
    /// Measured coverage in percent
    pub coverage: f64,
    /// Coverage estimate that ignores chain merges, in percent
    pub estimated_coverage: f64,
}

impl CoverageReport {
    /// Passwords the table can never crack
    pub fn missing(&self) -> u64 {
        self.total_keyspace.saturating_sub(self.reachable)
    }
}

/// Build the set of passwords reachable from the table
///
/// Processes all chains in parallel using rayon.
pub fn build_reachable_set(table: &RainbowTable) -> ReachableSet {
    let params = table.params();
    let keyspace = table.keyspace();

    table
        .entries()
        .par_iter()
        .fold(ReachableSet::new, |mut set, entry| {
            set.extend(enumerate_chain_passwords(
                &entry.start,
                params.hash_algorithm,
                params.chain_length,
                &keyspace,
            ));
            set
        })
        .reduce(ReachableSet::new, ReachableSet::merge)
}

/// Measure the keyspace coverage of a table
pub fn measure_coverage(table: &RainbowTable) -> CoverageReport {
    let params = table.params();
    let total = table.keyspace().total();
    let reachable = build_reachable_set(table).count_reachable();

    let coverage = if total == 0 {
        0.0
    } else {
        reachable as f64 / total as f64 * 100.0
    };

    CoverageReport {
        reachable,
        total_keyspace: total,
        coverage,
        estimated_coverage: estimated_coverage(params.chain_count, params.chain_length, total),
    }
}
