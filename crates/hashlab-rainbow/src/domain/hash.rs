//! Hash function implementations
//!
//! This module provides the digest functions chains are built from and the
//! reduction function that folds a digest back into the password keyspace.

use crate::constants::HASH_PREFIX_HEX_LEN;
use crate::domain::keyspace::Keyspace;
use crate::error::{RainbowError, Result};
use blake2::Blake2b512;
use digest::Digest;
use md4::Md4;
use md5::Md5;
use serde::Serialize;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};
use std::fmt;
use std::str::FromStr;

/// All the supported hash algorithms
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    Md4,
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Blake2b,
    /// MD4 over the UTF-16LE encoding of the password
    Ntlm,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 13] = [
        HashAlgorithm::Md4,
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha3_224,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Sha3_384,
        HashAlgorithm::Sha3_512,
        HashAlgorithm::Blake2b,
        HashAlgorithm::Ntlm,
    ];

    /// Canonical lowercase name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Md4 => "md4",
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Sha3_224 => "sha3_224",
            Self::Sha3_256 => "sha3_256",
            Self::Sha3_384 => "sha3_384",
            Self::Sha3_512 => "sha3_512",
            Self::Blake2b => "blake2b",
            Self::Ntlm => "ntlm",
        }
    }

    /// Digest size in bits
    pub fn digest_bits(&self) -> usize {
        match self {
            Self::Md4 | Self::Md5 | Self::Ntlm => 128,
            Self::Sha1 => 160,
            Self::Sha224 | Self::Sha3_224 => 224,
            Self::Sha256 | Self::Sha3_256 => 256,
            Self::Sha384 | Self::Sha3_384 => 384,
            Self::Sha512 | Self::Sha3_512 | Self::Blake2b => 512,
        }
    }

    /// Guess which algorithms could have produced a hex digest
    ///
    /// Only the digest length is informative, so the answer is a candidate
    /// list rather than a verdict. Non-hex input matches nothing.
    pub fn identify(digest: &str) -> Vec<HashAlgorithm> {
        let digest = digest.trim();
        if digest.is_empty() || !digest.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Vec::new();
        }
        let bits = digest.len() * 4;
        Self::ALL
            .into_iter()
            .filter(|algorithm| algorithm.digest_bits() == bits)
            .collect()
    }
}

impl FromStr for HashAlgorithm {
    type Err = RainbowError;

    /// Parse an algorithm name (case-insensitive, `-` and `_` interchangeable)
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let algorithm = match normalized.as_str() {
            "md4" => Self::Md4,
            "md5" => Self::Md5,
            "sha1" | "sha_1" => Self::Sha1,
            "sha224" | "sha_224" => Self::Sha224,
            "sha256" | "sha_256" => Self::Sha256,
            "sha384" | "sha_384" => Self::Sha384,
            "sha512" | "sha_512" => Self::Sha512,
            "sha3_224" => Self::Sha3_224,
            "sha3_256" => Self::Sha3_256,
            "sha3_384" => Self::Sha3_384,
            "sha3_512" => Self::Sha3_512,
            "blake2b" | "blake2b512" => Self::Blake2b,
            "ntlm" => Self::Ntlm,
            _ => return Err(RainbowError::UnsupportedAlgorithm(s.to_owned())),
        };
        Ok(algorithm)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[inline]
fn hex_digest<D: Digest>(data: &[u8]) -> String {
    hex::encode(D::digest(data))
}

/// UTF-16LE encodes a password.
fn utf16_le(password: &str) -> Vec<u8> {
    password.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

/// Hash a password and return the lowercase hex digest
///
/// Every algorithm except NTLM hashes the UTF-8 bytes of the password.
pub fn compute_hash(algorithm: HashAlgorithm, password: &str) -> String {
    let data = password.as_bytes();
    match algorithm {
        HashAlgorithm::Md4 => hex_digest::<Md4>(data),
        HashAlgorithm::Md5 => hex_digest::<Md5>(data),
        HashAlgorithm::Sha1 => hex_digest::<Sha1>(data),
        HashAlgorithm::Sha224 => hex_digest::<Sha224>(data),
        HashAlgorithm::Sha256 => hex_digest::<Sha256>(data),
        HashAlgorithm::Sha384 => hex_digest::<Sha384>(data),
        HashAlgorithm::Sha512 => hex_digest::<Sha512>(data),
        HashAlgorithm::Sha3_224 => hex_digest::<Sha3_224>(data),
        HashAlgorithm::Sha3_256 => hex_digest::<Sha3_256>(data),
        HashAlgorithm::Sha3_384 => hex_digest::<Sha3_384>(data),
        HashAlgorithm::Sha3_512 => hex_digest::<Sha3_512>(data),
        HashAlgorithm::Blake2b => hex_digest::<Blake2b512>(data),
        HashAlgorithm::Ntlm => hex_digest::<Md4>(&utf16_le(password)),
    }
}

/// Hash a password with an algorithm given by name
pub fn hash_password(algorithm: &str, password: &str) -> Result<String> {
    Ok(compute_hash(algorithm.parse()?, password))
}

/// Normalize an externally supplied digest
///
/// Trims whitespace and lowercases. The digest must be hexadecimal and long
/// enough to feed the reduction function.
pub fn normalize_digest(hash_hex: &str) -> Result<String> {
    let normalized = hash_hex.trim().to_ascii_lowercase();
    if normalized.len() < HASH_PREFIX_HEX_LEN
        || !normalized.bytes().all(|c| c.is_ascii_hexdigit())
    {
        return Err(RainbowError::InvalidHash(hash_hex.to_owned()));
    }
    Ok(normalized)
}

/// Reduce a hex digest into a password
///
/// The first 16 hex characters are read as an integer, the chain position
/// `step` is added, and the sum is taken modulo the keyspace size. Adding the
/// position makes every column of a chain use a different reduction.
///
/// The digest must be hexadecimal (see [`normalize_digest`]); a malformed
/// prefix reads as zero.
#[inline]
pub fn reduce_hash(hash_hex: &str, step: usize, keyspace: &Keyspace) -> String {
    let prefix = hash_hex.get(..HASH_PREFIX_HEX_LEN).unwrap_or(hash_hex);
    let hash_int = u64::from_str_radix(prefix, 16).unwrap_or(0);

    let total = keyspace.total();
    if total == 0 {
        return keyspace.decode(0);
    }

    // u128 keeps `hash_int + step` exact before the modulo
    let index = (u128::from(hash_int) + step as u128) % u128::from(total);
    keyspace.decode(index as u64)
}
