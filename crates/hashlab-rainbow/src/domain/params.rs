//! Table generation parameters
//!
//! The full parameter tuple identifies a table: two requests with equal
//! parameters can share one generated table.

use crate::constants::{
    DEFAULT_ALGORITHM, DEFAULT_CHAIN_COUNT, DEFAULT_CHAIN_LENGTH, DEFAULT_CHARSET,
    DEFAULT_MAX_LENGTH, MAX_PASSWORD_LENGTH_ALLOWED,
};
use crate::domain::charset::Charset;
use crate::domain::hash::HashAlgorithm;
use crate::domain::keyspace::Keyspace;
use crate::error::{RainbowError, Result};
use serde::Serialize;

/// Parameters a rainbow table is generated under
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct GenerationParameters {
    /// Resolved charset preset
    pub charset: Charset,
    /// Maximum password length
    pub max_length: usize,
    /// Hash function used along the chains
    pub hash_algorithm: HashAlgorithm,
    /// Hash → reduce steps per chain
    pub chain_length: usize,
    /// Number of chains in the table
    pub chain_count: usize,
}

impl GenerationParameters {
    /// Create parameters from request-style names
    ///
    /// Unknown charset names fall back to lowercase; unknown hash algorithms
    /// are rejected.
    pub fn new(
        charset: &str,
        max_length: usize,
        hash_algorithm: &str,
        chain_length: usize,
        chain_count: usize,
    ) -> Result<Self> {
        let params = Self {
            charset: Charset::from_name(charset),
            max_length,
            hash_algorithm: hash_algorithm.parse()?,
            chain_length,
            chain_count,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check the parameters against the supported limits
    pub fn validate(&self) -> Result<()> {
        if self.max_length > MAX_PASSWORD_LENGTH_ALLOWED {
            return Err(RainbowError::MaxLengthExceeded {
                max: MAX_PASSWORD_LENGTH_ALLOWED,
                requested: self.max_length,
            });
        }
        Ok(())
    }

    /// True when any dimension is zero; such parameters generate an empty table
    pub fn is_degenerate(&self) -> bool {
        self.max_length == 0 || self.chain_length == 0 || self.chain_count == 0
    }

    /// Keyspace the chains reduce into
    pub fn keyspace(&self) -> Keyspace {
        Keyspace::new(self.charset, self.max_length)
    }

    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_hash_algorithm(mut self, hash_algorithm: HashAlgorithm) -> Self {
        self.hash_algorithm = hash_algorithm;
        self
    }

    pub fn with_chain_length(mut self, chain_length: usize) -> Self {
        self.chain_length = chain_length;
        self
    }

    pub fn with_chain_count(mut self, chain_count: usize) -> Self {
        self.chain_count = chain_count;
        self
    }
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            charset: Charset::from_name(DEFAULT_CHARSET),
            max_length: DEFAULT_MAX_LENGTH,
            hash_algorithm: DEFAULT_ALGORITHM,
            chain_length: DEFAULT_CHAIN_LENGTH,
            chain_count: DEFAULT_CHAIN_COUNT,
        }
    }
}
