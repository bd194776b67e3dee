//! Error types for the rainbow table engine

use thiserror::Error;

/// Errors raised by table generation, lookup and hashing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RainbowError {
    /// The requested hash algorithm is not supported
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The target hash is not a usable hex digest
    #[error("Invalid hash '{0}': expected at least 16 hexadecimal characters")]
    InvalidHash(String),

    /// The maximum password length is above the supported limit
    #[error("Maximum password length {requested} exceeds the supported limit of {max}")]
    MaxLengthExceeded { max: usize, requested: usize },
}

pub type Result<T> = std::result::Result<T, RainbowError>;
