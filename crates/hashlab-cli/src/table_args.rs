//! Table parameter arguments shared by the binaries

use anyhow::{Context, Result};
use clap::Args;
use hashlab_rainbow::{
    DEFAULT_CHAIN_COUNT, DEFAULT_CHAIN_LENGTH, DEFAULT_CHARSET, DEFAULT_HASH_ALGORITHM,
    DEFAULT_MAX_LENGTH, GenerationParameters,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Charset preset: lowercase, digits, lowercase_digits, uppercase, alphanumeric
    #[arg(long, default_value = DEFAULT_CHARSET)]
    pub charset: String,

    /// Maximum password length (1-10)
    #[arg(long, default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: usize,

    /// Hash algorithm (md5, sha1, sha256, ntlm, ...)
    #[arg(long = "hash", default_value = DEFAULT_HASH_ALGORITHM)]
    pub hash_algorithm: String,

    /// Hash → reduce steps per chain
    #[arg(long, default_value_t = DEFAULT_CHAIN_LENGTH)]
    pub chain_length: usize,

    /// Number of chains
    #[arg(long, default_value_t = DEFAULT_CHAIN_COUNT)]
    pub chain_count: usize,

    /// Seed for the random start passwords
    #[arg(long)]
    pub seed: Option<u64>,
}

impl TableArgs {
    pub fn params(&self) -> Result<GenerationParameters> {
        GenerationParameters::new(
            &self.charset,
            self.max_length,
            &self.hash_algorithm,
            self.chain_length,
            self.chain_count,
        )
        .context("invalid table parameters")
    }

    /// RNG for start passwords, seeded when `--seed` is given
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
