//! Keyspace codec
//!
//! Maps an integer index onto the variable-length password space
//! `charset^1 ∪ charset^2 ∪ ... ∪ charset^max_length`.
//! Shorter passwords come first; within a length block the index is expanded
//! in base `|charset|` with the least-significant digit placed first.

use crate::domain::charset::Charset;

/// Size of the variable-length keyspace: Σ_{L=1}^{max_length} base^L
///
/// Returns 0 when `max_length` is 0. Saturates instead of overflowing.
pub fn total_keyspace(base: usize, max_length: usize) -> u64 {
    let base = base as u64;
    let mut total = 0u64;
    let mut block = 1u64;
    for _ in 0..max_length {
        block = block.saturating_mul(base);
        total = total.saturating_add(block);
    }
    total
}

/// Password keyspace over one charset, bounded by a maximum length
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Keyspace {
    charset: Charset,
    max_length: usize,
    total: u64,
}

impl Keyspace {
    /// Create a keyspace for the given charset and maximum length
    pub fn new(charset: Charset, max_length: usize) -> Self {
        Self {
            charset,
            max_length,
            total: total_keyspace(charset.base(), max_length),
        }
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Number of passwords in the keyspace
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Decode an index into a password
    ///
    /// `index` is expected to be below [`Keyspace::total`]; the reduction
    /// function guarantees this with a modulo. Out-of-range indices decode to
    /// the first charset character.
    pub fn decode(&self, index: u64) -> String {
        let chars = self.charset.chars();
        let base = chars.len() as u64;
        let mut index = index;
        let mut block = 1u64;

        for length in 1..=self.max_length {
            block = block.saturating_mul(base);
            if index < block {
                let mut password = String::with_capacity(length);
                let mut remainder = index;
                for _ in 0..length {
                    password.push(chars[(remainder % base) as usize] as char);
                    remainder /= base;
                }
                return password;
            }
            index -= block;
        }

        (chars[0] as char).to_string()
    }
}
