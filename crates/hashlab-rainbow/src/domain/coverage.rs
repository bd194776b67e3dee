//! Keyspace coverage
//!
//! Two views of how much of the keyspace a table reaches: the optimistic
//! estimate that assumes every chain position hits a fresh password, and a
//! set of the passwords the chains actually hash.

use rustc_hash::FxHashSet;

/// Estimated coverage in percent
///
/// `min(chain_count * chain_length / total * 100, 100)`. Ignores chain
/// merges, so it overstates the real coverage. Returns 0 for an empty
/// keyspace.
pub fn estimated_coverage(chain_count: usize, chain_length: usize, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }

    let covered = chain_count as f64 * chain_length as f64;
    (covered / total as f64 * 100.0).min(100.0)
}

/// Set of passwords reachable from a table
#[derive(Debug, Default, Clone)]
pub struct ReachableSet {
    passwords: FxHashSet<String>,
}

impl ReachableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a password as reachable
    ///
    /// Returns true if the password was not seen before.
    #[inline]
    pub fn insert(&mut self, password: String) -> bool {
        self.passwords.insert(password)
    }

    /// Check if the password is reachable
    #[inline]
    pub fn contains(&self, password: &str) -> bool {
        self.passwords.contains(password)
    }

    /// Merge another set into this one
    pub fn merge(mut self, other: ReachableSet) -> Self {
        // Extend the larger set
        if self.passwords.len() < other.passwords.len() {
            let mut other = other;
            other.passwords.extend(self.passwords);
            return other;
        }
        self.passwords.extend(other.passwords);
        self
    }

    /// Number of distinct reachable passwords
    pub fn count_reachable(&self) -> u64 {
        self.passwords.len() as u64
    }

    /// Number of keyspace passwords not reachable
    pub fn count_missing(&self, total: u64) -> u64 {
        total.saturating_sub(self.count_reachable())
    }
}

impl Extend<String> for ReachableSet {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        self.passwords.extend(iter);
    }
}
