//! Algorithm security profiles and brute-force time estimates
//!
//! Each supported algorithm carries a fixed profile: how badly it is broken,
//! whether unsalted digests of it are a practical rainbow table target, and a
//! rough single-GPU guessing rate used to estimate exhaustive search time.

use crate::domain::hash::HashAlgorithm;
use serde::Serialize;

/// Upper bound applied to reported keyspaces and durations
const ESTIMATE_CEILING: f64 = 1e50;

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_YEAR: f64 = 31_536_000.0;

/// How much trust an algorithm still deserves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityStatus {
    /// Unsalted digests are routinely reversed from public tables
    VeryBroken,
    /// Practical collision attacks exist
    Broken,
    /// No practical attack known
    Secure,
    /// Current NIST standard with the widest margin
    Strongest,
}

/// Static facts about a hash algorithm
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AlgorithmProfile {
    pub algorithm: HashAlgorithm,
    pub digest_bits: usize,
    pub status: SecurityStatus,
    /// Year the first practical attack was published
    pub year_broken: Option<u16>,
    /// Whether unsalted digests are a practical rainbow table target
    pub rainbow_vulnerable: bool,
    /// Approximate guesses per second on a single modern GPU
    pub hashes_per_second: u64,
    pub description: &'static str,
}

impl AlgorithmProfile {
    /// Look up the profile of an algorithm
    pub fn of(algorithm: HashAlgorithm) -> Self {
        use SecurityStatus::*;

        let (status, year_broken, rainbow_vulnerable, hashes_per_second, description) =
            match algorithm {
                HashAlgorithm::Md4 => (
                    Broken,
                    Some(1995),
                    true,
                    100_000_000_000,
                    "Predecessor of MD5. Collisions found in 1995.",
                ),
                HashAlgorithm::Md5 => (
                    Broken,
                    Some(2004),
                    true,
                    890_000_000,
                    "Collision attacks demonstrated in 2004. Unsuitable for security.",
                ),
                HashAlgorithm::Sha1 => (
                    Broken,
                    Some(2017),
                    true,
                    420_000_000,
                    "Practical collision (SHAttered) demonstrated in 2017.",
                ),
                HashAlgorithm::Sha224 => (
                    Secure,
                    None,
                    false,
                    180_000_000,
                    "Truncated SHA-256. Secure for general hashing, too fast for passwords.",
                ),
                HashAlgorithm::Sha256 => (
                    Secure,
                    None,
                    false,
                    180_000_000,
                    "SHA-2 family. Secure for general hashing, too fast for passwords.",
                ),
                HashAlgorithm::Sha384 => (
                    Secure,
                    None,
                    false,
                    80_000_000,
                    "Truncated SHA-512. Secure for general hashing.",
                ),
                HashAlgorithm::Sha512 => (
                    Secure,
                    None,
                    false,
                    80_000_000,
                    "Strongest SHA-2 variant. Secure for general hashing.",
                ),
                HashAlgorithm::Sha3_224 => (
                    Strongest,
                    None,
                    false,
                    120_000_000,
                    "224-bit SHA-3 (Keccak sponge).",
                ),
                HashAlgorithm::Sha3_256 => (
                    Strongest,
                    None,
                    false,
                    120_000_000,
                    "Latest NIST standard. Different internal structure than SHA-2.",
                ),
                HashAlgorithm::Sha3_384 => (
                    Strongest,
                    None,
                    false,
                    60_000_000,
                    "384-bit SHA-3 (Keccak sponge).",
                ),
                HashAlgorithm::Sha3_512 => (
                    Strongest,
                    None,
                    false,
                    60_000_000,
                    "512-bit SHA-3. Maximum security margin.",
                ),
                HashAlgorithm::Blake2b => (
                    Secure,
                    None,
                    false,
                    200_000_000,
                    "Faster than SHA-3 with a comparable margin.",
                ),
                HashAlgorithm::Ntlm => (
                    VeryBroken,
                    Some(2003),
                    true,
                    100_000_000_000,
                    "Windows legacy hash. No salt, massive public tables exist.",
                ),
            };

        Self {
            algorithm,
            digest_bits: algorithm.digest_bits(),
            status,
            year_broken,
            rainbow_vulnerable,
            hashes_per_second,
            description,
        }
    }
}

/// Brute-force cost of a single password under one algorithm
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CrackTimeEstimate {
    /// Size of the smallest charset class covering the password
    pub charset_size: u32,
    /// Candidates of the password's exact length
    pub keyspace: f64,
    pub hashes_per_second: u64,
    /// Worst-case exhaustive search time
    pub seconds: f64,
    pub human_readable: String,
}

/// Size of the charset an attacker would assume for `password`
///
/// Passwords with any symbol, or with none of the recognized classes, are
/// treated as printable ASCII.
pub fn charset_size_for(password: &str) -> u32 {
    let has_lower = password.chars().any(char::is_lowercase);
    let has_upper = password.chars().any(char::is_uppercase);
    let has_digit = password.chars().any(char::is_numeric);
    let has_special = password.chars().any(|c| !c.is_alphanumeric());

    match (has_lower, has_upper, has_digit, has_special) {
        (_, _, _, true) => 95,
        (true, true, true, _) => 62,
        (true, true, false, _) => 52,
        (true, false, true, _) => 36,
        (true, false, false, _) => 26,
        _ => 95,
    }
}

/// Estimate how long exhausting `password`'s keyspace takes under `algorithm`
pub fn estimate_crack_time(algorithm: HashAlgorithm, password: &str) -> CrackTimeEstimate {
    let hashes_per_second = AlgorithmProfile::of(algorithm).hashes_per_second;
    let charset_size = charset_size_for(password);
    let length = i32::try_from(password.chars().count()).unwrap_or(i32::MAX);

    let keyspace = f64::from(charset_size).powi(length);
    let seconds = keyspace / hashes_per_second as f64;

    CrackTimeEstimate {
        charset_size,
        keyspace: keyspace.min(ESTIMATE_CEILING),
        hashes_per_second,
        seconds: seconds.min(ESTIMATE_CEILING),
        human_readable: human_duration(seconds),
    }
}

/// Render a duration in seconds with the largest fitting unit
pub fn human_duration(seconds: f64) -> String {
    if seconds < 1.0 {
        "< 1 second".to_owned()
    } else if seconds < SECONDS_PER_MINUTE {
        format!("{:.1} seconds", seconds)
    } else if seconds < SECONDS_PER_HOUR {
        format!("{:.1} minutes", seconds / SECONDS_PER_MINUTE)
    } else if seconds < SECONDS_PER_DAY {
        format!("{:.1} hours", seconds / SECONDS_PER_HOUR)
    } else if seconds < SECONDS_PER_YEAR {
        format!("{:.1} days", seconds / SECONDS_PER_DAY)
    } else if seconds < SECONDS_PER_YEAR * 1_000.0 {
        format!("{:.1} years", seconds / SECONDS_PER_YEAR)
    } else if seconds < SECONDS_PER_YEAR * 1_000_000.0 {
        format!("{:.0e} years", seconds / SECONDS_PER_YEAR)
    } else {
        "Effectively infinite".to_owned()
    }
}
