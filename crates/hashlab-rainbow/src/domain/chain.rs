//! Chain operations implementation
//!
//! This module provides the chain entry structure and functions for
//! chain generation, verification and visualization.

use crate::domain::hash::{HashAlgorithm, compute_hash, reduce_hash};
use crate::domain::keyspace::Keyspace;
use serde::Serialize;

/// Largest number of elements reserved up front for a per-step buffer
const MAX_PREALLOC: usize = 1 << 16;

/// Capacity to reserve for a buffer that will hold `len` items
///
/// `None` (an overflowed length) and very long chains reserve the cap and let
/// the buffer grow as steps are pushed.
#[inline]
fn prealloc_capacity(len: Option<usize>) -> usize {
    len.map_or(MAX_PREALLOC, |n| n.min(MAX_PREALLOC))
}

/// Chain entry structure
///
/// Only the two ends of a chain are stored; every intermediate password is
/// recomputed on demand.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ChainEntry {
    /// Starting password of the chain
    pub start: String,
    /// Ending password of the chain
    pub end: String,
    /// Position of the chain in its table
    pub chain_index: usize,
}

impl ChainEntry {
    /// Create a new chain entry
    pub fn new(start: impl Into<String>, end: impl Into<String>, chain_index: usize) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            chain_index,
        }
    }
}

/// A password found by re-walking a chain
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainMatch {
    /// Password whose hash equals the target
    pub password: String,
    /// Chain position the password was found at
    pub position: usize,
}

/// Walk a chain
///
/// Starting from `start`, repeat hash → reduce `steps` times and return the
/// final password. The reduction at the n-th step uses `n` as its position.
pub fn walk_chain(start: &str, algorithm: HashAlgorithm, steps: usize, keyspace: &Keyspace) -> String {
    let mut current = start.to_owned();

    for n in 0..steps {
        let hash = compute_hash(algorithm, &current);
        current = reduce_hash(&hash, n, keyspace);
    }

    current
}

/// Compute a single chain of the table
pub fn compute_chain(
    start: String,
    chain_index: usize,
    algorithm: HashAlgorithm,
    chain_length: usize,
    keyspace: &Keyspace,
) -> ChainEntry {
    let end = walk_chain(&start, algorithm, chain_length, keyspace);

    ChainEntry {
        start,
        end,
        chain_index,
    }
}

/// Verify a chain against a target hash
///
/// Re-walks the chain from `start`, hashing the password at every position.
/// Returns the first password whose hash equals `target_hash`. An endpoint
/// match alone can be a false alarm caused by merging chains; only this hash
/// comparison is authoritative.
pub fn verify_chain(
    start: &str,
    target_hash: &str,
    algorithm: HashAlgorithm,
    chain_length: usize,
    keyspace: &Keyspace,
) -> Option<ChainMatch> {
    let mut current = start.to_owned();

    for position in 0..chain_length {
        let hash = compute_hash(algorithm, &current);
        if hash == target_hash {
            return Some(ChainMatch {
                password: current,
                position,
            });
        }
        current = reduce_hash(&hash, position, keyspace);
    }

    None
}

/// Enumerate the passwords a chain covers
///
/// Returns the `chain_length` passwords that get hashed along the chain
/// (positions `0..chain_length`). The endpoint itself is never hashed and is
/// not included.
pub fn enumerate_chain_passwords(
    start: &str,
    algorithm: HashAlgorithm,
    chain_length: usize,
    keyspace: &Keyspace,
) -> Vec<String> {
    let mut passwords = Vec::with_capacity(prealloc_capacity(Some(chain_length)));
    let mut current = start.to_owned();

    for n in 0..chain_length {
        let hash = compute_hash(algorithm, &current);
        let next = reduce_hash(&hash, n, keyspace);
        passwords.push(std::mem::replace(&mut current, next));
    }

    passwords
}

// =============================================================================
// Chain visualization
// =============================================================================

/// One element of a visualized chain walk
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChainTraceStep {
    /// The starting password
    Start { step: usize, password: String },
    /// Digest of the previous password
    Hash { step: usize, hash: String },
    /// Password reduced from the previous digest
    Reduce {
        step: usize,
        password: String,
        reduction_index: usize,
    },
}

impl ChainTraceStep {
    /// Index of this element in the trace
    pub fn step(&self) -> usize {
        match self {
            Self::Start { step, .. } | Self::Hash { step, .. } | Self::Reduce { step, .. } => *step,
        }
    }
}

/// A fully recorded chain walk
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChainTrace {
    pub start: String,
    pub end: String,
    pub chain_length: usize,
    pub steps: Vec<ChainTraceStep>,
}

/// Walk a chain and record every intermediate hash and password
///
/// Produces `2 * chain_length + 1` steps: the start, then a hash and a
/// reduce per chain position. The end password equals
/// [`walk_chain`] for the same inputs.
pub fn trace_chain(
    start: &str,
    algorithm: HashAlgorithm,
    chain_length: usize,
    keyspace: &Keyspace,
) -> ChainTrace {
    let step_count = chain_length.checked_mul(2).and_then(|n| n.checked_add(1));
    let mut steps = Vec::with_capacity(prealloc_capacity(step_count));
    let mut current = start.to_owned();

    steps.push(ChainTraceStep::Start {
        step: 0,
        password: current.clone(),
    });

    for i in 0..chain_length {
        let hash = compute_hash(algorithm, &current);
        current = reduce_hash(&hash, i, keyspace);

        steps.push(ChainTraceStep::Hash {
            step: i * 2 + 1,
            hash,
        });
        steps.push(ChainTraceStep::Reduce {
            step: i * 2 + 2,
            password: current.clone(),
            reduction_index: i,
        });
    }

    ChainTrace {
        start: start.to_owned(),
        end: current,
        chain_length,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::charset::Charset;

    fn keyspace() -> Keyspace {
        Keyspace::new(Charset::Lowercase, 4)
    }

    #[test]
    fn test_walk_chain_deterministic() {
        let ks = keyspace();
        let end1 = walk_chain("test", HashAlgorithm::Md5, 50, &ks);
        let end2 = walk_chain("test", HashAlgorithm::Md5, 50, &ks);
        assert_eq!(end1, end2);
    }

    #[test]
    fn test_walk_chain_zero_steps() {
        assert_eq!(walk_chain("test", HashAlgorithm::Md5, 0, &keyspace()), "test");
    }

    #[test]
    fn test_walk_chain_single_step() {
        let ks = keyspace();
        let hash = compute_hash(HashAlgorithm::Md5, "test");
        assert_eq!(
            walk_chain("test", HashAlgorithm::Md5, 1, &ks),
            reduce_hash(&hash, 0, &ks)
        );
    }

    #[test]
    fn test_walk_chain_different_algorithm() {
        let ks = keyspace();
        let md5 = walk_chain("test", HashAlgorithm::Md5, 20, &ks);
        let sha1 = walk_chain("test", HashAlgorithm::Sha1, 20, &ks);
        assert_ne!(md5, sha1);
    }

    #[test]
    fn test_walk_chain_stays_in_keyspace() {
        let ks = keyspace();
        let end = walk_chain("zzzz", HashAlgorithm::Sha256, 30, &ks);
        assert!((1..=4).contains(&end.len()));
        assert!(end.bytes().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_compute_chain_matches_walk() {
        let ks = keyspace();
        let entry = compute_chain("abc".to_owned(), 7, HashAlgorithm::Md5, 25, &ks);
        assert_eq!(entry.start, "abc");
        assert_eq!(entry.end, walk_chain("abc", HashAlgorithm::Md5, 25, &ks));
        assert_eq!(entry.chain_index, 7);
    }

    #[test]
    fn test_verify_chain_at_start() {
        let ks = keyspace();
        let hash = compute_hash(HashAlgorithm::Md5, "abc");

        let result = verify_chain("abc", &hash, HashAlgorithm::Md5, 10, &ks);
        assert_eq!(
            result,
            Some(ChainMatch {
                password: "abc".to_owned(),
                position: 0
            })
        );
    }

    #[test]
    fn test_verify_chain_later_position() {
        let ks = keyspace();
        let passwords = enumerate_chain_passwords("abc", HashAlgorithm::Md5, 10, &ks);
        let target = compute_hash(HashAlgorithm::Md5, &passwords[5]);

        let result = verify_chain("abc", &target, HashAlgorithm::Md5, 10, &ks).unwrap();
        assert_eq!(compute_hash(HashAlgorithm::Md5, &result.password), target);
        assert!(result.position <= 5);
    }

    #[test]
    fn test_verify_chain_wrong_hash() {
        let ks = keyspace();
        let wrong = "00000000000000000000000000000000";
        assert_eq!(verify_chain("abc", wrong, HashAlgorithm::Md5, 10, &ks), None);
    }

    #[test]
    fn test_verify_chain_ignores_endpoint() {
        let ks = keyspace();
        let entry = compute_chain("abc".to_owned(), 0, HashAlgorithm::Md5, 3, &ks);
        let passwords = enumerate_chain_passwords("abc", HashAlgorithm::Md5, 3, &ks);
        // The endpoint is only hashed if it also occurs earlier in the chain
        if !passwords.contains(&entry.end) {
            let end_hash = compute_hash(HashAlgorithm::Md5, &entry.end);
            assert_eq!(verify_chain("abc", &end_hash, HashAlgorithm::Md5, 3, &ks), None);
        }
    }

    #[test]
    fn test_enumerate_chain_passwords_length() {
        let passwords = enumerate_chain_passwords("abc", HashAlgorithm::Md5, 12, &keyspace());
        assert_eq!(passwords.len(), 12);
        assert_eq!(passwords[0], "abc");
    }

    #[test]
    fn test_enumerate_chain_passwords_follow_walk() {
        let ks = keyspace();
        let passwords = enumerate_chain_passwords("abc", HashAlgorithm::Md5, 12, &ks);
        for (n, password) in passwords.iter().enumerate() {
            assert_eq!(*password, walk_chain("abc", HashAlgorithm::Md5, n, &ks));
        }
    }

    // =============================================================================
    // trace_chain tests
    // =============================================================================

    #[test]
    fn test_trace_chain_length() {
        let trace = trace_chain("test", HashAlgorithm::Md5, 10, &keyspace());
        assert_eq!(trace.steps.len(), 21);
        assert_eq!(trace.chain_length, 10);
        for (i, step) in trace.steps.iter().enumerate() {
            assert_eq!(step.step(), i);
        }
    }

    #[test]
    fn test_trace_chain_shape() {
        let ks = keyspace();
        let trace = trace_chain("test", HashAlgorithm::Md5, 3, &ks);

        assert_eq!(
            trace.steps[0],
            ChainTraceStep::Start {
                step: 0,
                password: "test".to_owned()
            }
        );
        assert_eq!(
            trace.steps[1],
            ChainTraceStep::Hash {
                step: 1,
                hash: compute_hash(HashAlgorithm::Md5, "test")
            }
        );
        match &trace.steps[6] {
            ChainTraceStep::Reduce {
                password,
                reduction_index,
                ..
            } => {
                assert_eq!(*reduction_index, 2);
                assert_eq!(*password, trace.end);
            }
            other => panic!("expected a reduce step, got {:?}", other),
        }
    }

    #[test]
    fn test_trace_chain_end_matches_walk() {
        let ks = keyspace();
        let trace = trace_chain("test", HashAlgorithm::Sha256, 15, &ks);
        assert_eq!(trace.end, walk_chain("test", HashAlgorithm::Sha256, 15, &ks));
    }

    #[test]
    fn test_trace_chain_zero_length() {
        let trace = trace_chain("test", HashAlgorithm::Md5, 0, &keyspace());
        assert_eq!(trace.steps.len(), 1);
        assert_eq!(trace.end, "test");
    }

    #[test]
    fn test_prealloc_capacity_is_bounded() {
        assert_eq!(prealloc_capacity(Some(0)), 0);
        assert_eq!(prealloc_capacity(Some(21)), 21);
        assert_eq!(prealloc_capacity(Some(usize::MAX)), MAX_PREALLOC);
        assert_eq!(
            prealloc_capacity(usize::MAX.checked_mul(2)),
            MAX_PREALLOC
        );
    }

    #[test]
    fn test_long_chain_grows_past_prealloc() {
        let ks = Keyspace::new(Charset::Digits, 2);
        let length = MAX_PREALLOC + 3;
        let passwords = enumerate_chain_passwords("7", HashAlgorithm::Md5, length, &ks);
        assert_eq!(passwords.len(), length);
        assert_eq!(passwords[0], "7");
    }
}
