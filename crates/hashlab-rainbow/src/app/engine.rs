//! Engine facade
//!
//! Ties table generation, the table cache and the lookup together into the
//! three user-facing operations: generate a table, crack a hash and
//! visualize a chain.

use crate::app::coverage::{CoverageReport, measure_coverage};
use crate::app::generator::{RainbowTable, build_table, build_table_with_rng};
use crate::app::searcher::{CrackResult, lookup_in_table};
use crate::constants::MAX_PASSWORD_LENGTH_ALLOWED;
use crate::domain::chain::{ChainTrace, trace_chain};
use crate::domain::charset::Charset;
use crate::domain::coverage::estimated_coverage;
use crate::domain::hash::{self, HashAlgorithm, normalize_digest};
use crate::domain::keyspace::Keyspace;
use crate::domain::params::GenerationParameters;
use crate::domain::strength::{AlgorithmProfile, CrackTimeEstimate, estimate_crack_time};
use crate::error::{RainbowError, Result};
use crate::infra::table_cache::{CacheStatus, TableCache};
use rand::Rng;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn serialize_secs<S: Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Result of a table generation
#[derive(Clone, Debug, Serialize)]
pub struct TableReport {
    pub table: Arc<RainbowTable>,
    /// Number of chains
    pub table_size: usize,
    pub chain_length: usize,
    #[serde(serialize_with = "serialize_secs")]
    pub generation_time: Duration,
    pub total_keyspace: u64,
    /// Coverage estimate in percent
    pub estimated_coverage: f64,
}

/// Result of a crack request
#[derive(Clone, Debug, Serialize)]
pub struct CrackReport {
    #[serde(flatten)]
    pub result: CrackResult,
    /// Zero when the table came from the cache
    #[serde(serialize_with = "serialize_secs")]
    pub table_generation_time: Duration,
    #[serde(serialize_with = "serialize_secs")]
    pub lookup_time: Duration,
    #[serde(serialize_with = "serialize_secs")]
    pub total_time: Duration,
    /// Number of chains in the table searched
    pub total_chains: usize,
    pub cache_hit: bool,
}

/// One algorithm's view of a password: its digest, profile and brute-force cost
#[derive(Clone, Debug, Serialize)]
pub struct HashAnalysis {
    #[serde(flatten)]
    pub profile: AlgorithmProfile,
    pub hash: String,
    pub crack_estimate: CrackTimeEstimate,
}

/// Rainbow table engine
///
/// Cheap to clone; clones share the same table cache.
#[derive(Clone, Debug, Default)]
pub struct RainbowEngine {
    cache: Arc<TableCache>,
}

impl RainbowEngine {
    /// Create an engine with its own empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine on top of an existing cache
    pub fn with_cache(cache: Arc<TableCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<TableCache> {
        &self.cache
    }

    /// Generate a table and store it in the cache
    pub fn generate_table(&self, params: &GenerationParameters) -> Result<TableReport> {
        self.generate_table_from(params, build_table)
    }

    /// Same as [`RainbowEngine::generate_table`], drawing start passwords from `rng`
    pub fn generate_table_with_rng<R: Rng + ?Sized>(
        &self,
        params: &GenerationParameters,
        rng: &mut R,
    ) -> Result<TableReport> {
        self.generate_table_from(params, |p| build_table_with_rng(p, rng))
    }

    fn generate_table_from<F>(&self, params: &GenerationParameters, build: F) -> Result<TableReport>
    where
        F: FnOnce(&GenerationParameters) -> RainbowTable,
    {
        params.validate()?;

        let start = Instant::now();
        let table = Arc::new(build(params));
        let generation_time = start.elapsed();

        self.cache.insert(Arc::clone(&table));

        let total_keyspace = table.keyspace().total();
        let report = TableReport {
            table_size: table.len(),
            chain_length: params.chain_length,
            generation_time,
            total_keyspace,
            estimated_coverage: estimated_coverage(
                params.chain_count,
                params.chain_length,
                total_keyspace,
            ),
            table,
        };

        tracing::info!(
            chains = report.table_size,
            chain_length = report.chain_length,
            total_keyspace,
            elapsed = ?generation_time,
            "generated rainbow table"
        );
        Ok(report)
    }

    /// Crack a hash with a table built under `params`
    ///
    /// The table is taken from the cache when the parameters match the
    /// cached one, otherwise it is generated and cached.
    pub fn crack(&self, target_hash: &str, params: &GenerationParameters) -> Result<CrackReport> {
        self.crack_from(target_hash, params, |cache| cache.get_or_build(params))
    }

    /// Same as [`RainbowEngine::crack`], drawing start passwords from `rng` on a cache miss
    pub fn crack_with_rng<R: Rng + ?Sized>(
        &self,
        target_hash: &str,
        params: &GenerationParameters,
        rng: &mut R,
    ) -> Result<CrackReport> {
        self.crack_from(target_hash, params, |cache| {
            cache.get_or_build_with_rng(params, rng)
        })
    }

    fn crack_from<F>(
        &self,
        target_hash: &str,
        params: &GenerationParameters,
        fetch: F,
    ) -> Result<CrackReport>
    where
        F: FnOnce(&TableCache) -> (Arc<RainbowTable>, CacheStatus),
    {
        let target = normalize_digest(target_hash)?;
        params.validate()?;

        let start = Instant::now();
        let (table, status) = fetch(&self.cache);
        let table_generation_time = match status {
            CacheStatus::Hit => Duration::ZERO,
            CacheStatus::Miss => start.elapsed(),
        };

        let lookup_start = Instant::now();
        let result = lookup_in_table(&target, &table);
        let lookup_time = lookup_start.elapsed();

        tracing::info!(
            found = result.found,
            chains_searched = result.chains_searched,
            cache_hit = status.is_hit(),
            "crack finished"
        );

        Ok(CrackReport {
            result,
            table_generation_time,
            lookup_time,
            total_time: table_generation_time + lookup_time,
            total_chains: table.len(),
            cache_hit: status.is_hit(),
        })
    }

    /// Record every hash and reduction of a single chain
    ///
    /// Unknown charset names fall back to lowercase.
    pub fn visualize_chain(
        &self,
        start_password: &str,
        hash_algorithm: &str,
        chain_length: usize,
        charset: &str,
        max_length: usize,
    ) -> Result<ChainTrace> {
        let algorithm: HashAlgorithm = hash_algorithm.parse()?;
        if max_length > MAX_PASSWORD_LENGTH_ALLOWED {
            return Err(RainbowError::MaxLengthExceeded {
                max: MAX_PASSWORD_LENGTH_ALLOWED,
                requested: max_length,
            });
        }

        let keyspace = Keyspace::new(Charset::from_name(charset), max_length);
        Ok(trace_chain(start_password, algorithm, chain_length, &keyspace))
    }

    /// Hash a password with an algorithm given by name
    pub fn hash_password(&self, algorithm: &str, password: &str) -> Result<String> {
        hash::hash_password(algorithm, password)
    }

    /// Hash a password under every supported algorithm
    pub fn analyze_password(&self, password: &str) -> Vec<HashAnalysis> {
        HashAlgorithm::ALL
            .into_iter()
            .map(|algorithm| HashAnalysis {
                profile: AlgorithmProfile::of(algorithm),
                hash: hash::compute_hash(algorithm, password),
                crack_estimate: estimate_crack_time(algorithm, password),
            })
            .collect()
    }

    /// Candidate algorithms for a digest, judged by its length
    pub fn identify_hash(&self, digest: &str) -> Vec<HashAlgorithm> {
        HashAlgorithm::identify(digest)
    }

    /// Measure how many distinct passwords a table actually reaches
    pub fn measure_coverage(&self, table: &RainbowTable) -> CoverageReport {
        measure_coverage(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hash::compute_hash;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn params() -> GenerationParameters {
        GenerationParameters::default()
            .with_max_length(3)
            .with_chain_length(20)
            .with_chain_count(200)
    }

    #[test]
    fn test_generate_table_report() {
        let engine = RainbowEngine::new();
        let report = engine.generate_table(&params()).unwrap();

        assert_eq!(report.table_size, 200);
        assert_eq!(report.chain_length, 20);
        assert_eq!(report.total_keyspace, 18_278);
        let expected = 4000.0 / 18_278.0 * 100.0;
        assert!((report.estimated_coverage - expected).abs() < 1e-9);
    }

    #[test]
    fn test_generate_table_stores_in_cache() {
        let engine = RainbowEngine::new();
        let report = engine.generate_table(&params()).unwrap();

        let cached = engine.cache().get(&params()).unwrap();
        assert!(Arc::ptr_eq(&cached, &report.table));

        let hash = compute_hash(HashAlgorithm::Md5, "cat");
        let crack = engine.crack(&hash, &params()).unwrap();
        assert!(crack.cache_hit);
        assert_eq!(crack.table_generation_time, Duration::ZERO);
    }

    #[test]
    fn test_generate_table_rejects_long_passwords() {
        let engine = RainbowEngine::new();
        let err = engine
            .generate_table(&params().with_max_length(11))
            .unwrap_err();
        assert!(matches!(err, RainbowError::MaxLengthExceeded { .. }));
        assert_eq!(engine.cache().cached_params(), None);
    }

    #[test]
    fn test_generate_table_degenerate() {
        let engine = RainbowEngine::new();
        let report = engine.generate_table(&params().with_max_length(0)).unwrap();
        assert_eq!(report.table_size, 0);
        assert_eq!(report.total_keyspace, 0);
        assert_eq!(report.estimated_coverage, 0.0);
    }

    #[test]
    fn test_crack_cache_reuse() {
        let engine = RainbowEngine::new();
        let hash = compute_hash(HashAlgorithm::Md5, "dog");

        let first = engine
            .crack_with_rng(&hash, &params(), &mut StdRng::seed_from_u64(1))
            .unwrap();
        let table = engine.cache().get(&params()).unwrap();
        let second = engine.crack(&hash, &params()).unwrap();

        assert!(!first.cache_hit);
        assert!(second.cache_hit);
        assert_eq!(second.table_generation_time, Duration::ZERO);
        assert_eq!(first.result, second.result);
        assert!(Arc::ptr_eq(&table, &engine.cache().get(&params()).unwrap()));
    }

    #[test]
    fn test_crack_normalizes_target() {
        let engine = RainbowEngine::new();
        let hash = compute_hash(HashAlgorithm::Md5, "cat");
        let noisy = format!("  {}\n", hash.to_uppercase());

        let a = engine.crack(&hash, &params()).unwrap();
        let b = engine.crack(&noisy, &params()).unwrap();
        assert_eq!(a.result, b.result);
    }

    #[test]
    fn test_crack_invalid_hash() {
        let engine = RainbowEngine::new();
        assert!(matches!(
            engine.crack("not-a-hash", &params()),
            Err(RainbowError::InvalidHash(_))
        ));
        assert!(matches!(
            engine.crack("abcdef", &params()),
            Err(RainbowError::InvalidHash(_))
        ));
        // Rejected before any table is built
        assert_eq!(engine.cache().cached_params(), None);
    }

    #[test]
    fn test_crack_totals() {
        let engine = RainbowEngine::new();
        let hash = compute_hash(HashAlgorithm::Md5, "zzz");
        let report = engine.crack(&hash, &params()).unwrap();

        assert_eq!(report.total_chains, 200);
        assert_eq!(
            report.total_time,
            report.table_generation_time + report.lookup_time
        );
        if report.result.found {
            let password = report.result.password.unwrap();
            assert_eq!(compute_hash(HashAlgorithm::Md5, &password), hash);
        }
    }

    #[test]
    fn test_crack_report_serializes_flat() {
        let engine = RainbowEngine::new();
        let hash = compute_hash(HashAlgorithm::Md5, "cat");
        let report = engine.crack(&hash, &params()).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["found"].is_boolean());
        assert!(json["chains_searched"].is_u64());
        assert!(json["lookup_time"].is_f64());
        assert_eq!(json["total_chains"], 200);
        assert_eq!(json["cache_hit"], false);
    }

    #[test]
    fn test_shared_cache_between_engines() {
        let cache = Arc::new(TableCache::new());
        let a = RainbowEngine::with_cache(Arc::clone(&cache));
        let b = RainbowEngine::with_cache(Arc::clone(&cache));

        a.generate_table(&params()).unwrap();
        let hash = compute_hash(HashAlgorithm::Md5, "abc");
        assert!(b.crack(&hash, &params()).unwrap().cache_hit);
    }

    #[test]
    fn test_visualize_chain() {
        let engine = RainbowEngine::new();
        let trace = engine
            .visualize_chain("test", "md5", 10, "lowercase", 4)
            .unwrap();

        assert_eq!(trace.start, "test");
        assert_eq!(trace.steps.len(), 21);

        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["steps"][0]["type"], "start");
        assert_eq!(json["steps"][1]["type"], "hash");
        assert_eq!(json["steps"][2]["type"], "reduce");
        assert_eq!(json["steps"][2]["reduction_index"], 0);
    }

    #[test]
    fn test_visualize_chain_charset_fallback() {
        let engine = RainbowEngine::new();
        let a = engine.visualize_chain("pw", "sha1", 5, "nope", 3).unwrap();
        let b = engine.visualize_chain("pw", "sha1", 5, "lowercase", 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_visualize_chain_errors() {
        let engine = RainbowEngine::new();
        assert!(matches!(
            engine.visualize_chain("pw", "crc32", 5, "digits", 3),
            Err(RainbowError::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            engine.visualize_chain("pw", "md5", 5, "digits", 12),
            Err(RainbowError::MaxLengthExceeded { .. })
        ));
    }

    #[test]
    fn test_hash_password() {
        let engine = RainbowEngine::new();
        assert_eq!(
            engine.hash_password("MD5", "abc").unwrap(),
            "900150983cd24fb0d6963f7d28e17f72"
        );
        assert!(engine.hash_password("whirlpool", "abc").is_err());
    }

    #[test]
    fn test_analyze_password() {
        let engine = RainbowEngine::new();
        let analysis = engine.analyze_password("abc");

        assert_eq!(analysis.len(), HashAlgorithm::ALL.len());
        let md5 = &analysis[1];
        assert_eq!(md5.profile.algorithm, HashAlgorithm::Md5);
        assert_eq!(md5.hash, "900150983cd24fb0d6963f7d28e17f72");
        assert!(md5.profile.rainbow_vulnerable);
        assert_eq!(md5.crack_estimate.charset_size, 26);
        assert_eq!(md5.crack_estimate.human_readable, "< 1 second");

        let json = serde_json::to_value(md5).unwrap();
        assert_eq!(json["algorithm"], "md5");
        assert_eq!(json["status"], "broken");
        assert_eq!(json["rainbow_vulnerable"], true);
        assert_eq!(json["crack_estimate"]["charset_size"], 26);
    }

    #[test]
    fn test_identify_hash() {
        let engine = RainbowEngine::new();
        let digest = engine.hash_password("sha1", "abc").unwrap();
        assert_eq!(engine.identify_hash(&digest), vec![HashAlgorithm::Sha1]);
        assert!(engine.identify_hash("not a digest").is_empty());
    }
}
