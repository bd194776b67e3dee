//! In-memory table cache
//!
//! Holds at most one generated table, keyed by its generation parameters.
//! A crack request with the same parameters as the previous one reuses the
//! table instead of regenerating it.

use crate::app::generator::{RainbowTable, build_table, build_table_with_rng};
use crate::domain::params::GenerationParameters;
use rand::Rng;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Whether a cache access reused the stored table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheStatus::Hit)
    }
}

/// Single-slot table cache
///
/// The lock is held across the key check and the build, so concurrent
/// requests for the same parameters generate the table once.
#[derive(Debug, Default)]
pub struct TableCache {
    slot: Mutex<Option<Arc<RainbowTable>>>,
}

impl TableCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    // The slot is only ever replaced whole, so a poisoned lock still guards a
    // consistent value.
    fn lock(&self) -> MutexGuard<'_, Option<Arc<RainbowTable>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached table for `params`, generating it on a miss
    pub fn get_or_build(&self, params: &GenerationParameters) -> (Arc<RainbowTable>, CacheStatus) {
        self.get_or_insert_with(params, build_table)
    }

    /// Same as [`TableCache::get_or_build`], drawing start passwords from `rng` on a miss
    pub fn get_or_build_with_rng<R: Rng + ?Sized>(
        &self,
        params: &GenerationParameters,
        rng: &mut R,
    ) -> (Arc<RainbowTable>, CacheStatus) {
        self.get_or_insert_with(params, |p| build_table_with_rng(p, rng))
    }

    /// Return the cached table for `params`, calling `build` on a miss
    ///
    /// A miss replaces whatever table was cached before.
    pub fn get_or_insert_with<F>(
        &self,
        params: &GenerationParameters,
        build: F,
    ) -> (Arc<RainbowTable>, CacheStatus)
    where
        F: FnOnce(&GenerationParameters) -> RainbowTable,
    {
        let mut slot = self.lock();

        if let Some(table) = slot.as_ref().filter(|t| t.params() == params) {
            tracing::debug!(?params, "table cache hit");
            return (Arc::clone(table), CacheStatus::Hit);
        }

        tracing::debug!(?params, "table cache miss");
        let table = Arc::new(build(params));
        *slot = Some(Arc::clone(&table));
        (table, CacheStatus::Miss)
    }

    /// Return the cached table if it was built with `params`
    pub fn get(&self, params: &GenerationParameters) -> Option<Arc<RainbowTable>> {
        self.lock()
            .as_ref()
            .filter(|t| t.params() == params)
            .map(Arc::clone)
    }

    /// Store a table, replacing the cached one
    pub fn insert(&self, table: Arc<RainbowTable>) {
        *self.lock() = Some(table);
    }

    /// Drop the cached table
    pub fn clear(&self) {
        *self.lock() = None;
    }

    /// Parameters of the cached table, if any
    pub fn cached_params(&self) -> Option<GenerationParameters> {
        self.lock().as_ref().map(|t| *t.params())
    }
}
