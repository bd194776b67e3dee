//! Rainbow table related constants
//!
//! Defaults mirror the parameters a demo request uses when a field is omitted.

use crate::domain::hash::HashAlgorithm;

// =============================================================================
// Generation defaults
// =============================================================================

/// Default charset preset name
pub const DEFAULT_CHARSET: &str = "lowercase";

/// Default maximum password length
pub const DEFAULT_MAX_LENGTH: usize = 4;

/// Default hash algorithm
pub const DEFAULT_ALGORITHM: HashAlgorithm = HashAlgorithm::Md5;

/// Default hash algorithm name
pub const DEFAULT_HASH_ALGORITHM: &str = DEFAULT_ALGORITHM.name();

/// Default number of hash → reduce steps per chain
pub const DEFAULT_CHAIN_LENGTH: usize = 100;

/// Default number of chains per table
pub const DEFAULT_CHAIN_COUNT: usize = 500;

// =============================================================================
// Chain visualization defaults
// =============================================================================

/// Default starting password for a visualized chain
pub const DEFAULT_VISUALIZER_START: &str = "test";

/// Default chain length for a visualized chain
pub const DEFAULT_VISUALIZER_CHAIN_LENGTH: usize = 10;

// =============================================================================
// Limits
// =============================================================================

/// Maximum password length allowed.
///
/// 62^10 + ... + 62 still fits in a u64 keyspace; one more character does not.
pub const MAX_PASSWORD_LENGTH_ALLOWED: usize = 10;

/// Number of leading hex characters of a digest fed to the reduction function
pub const HASH_PREFIX_HEX_LEN: usize = 16;
