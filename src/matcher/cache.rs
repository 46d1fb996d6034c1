//! Compiled-pattern caching.
//!
//! Patterns are otherwise reparsed and recompiled on every call. The cache
//! keeps recently used [`CompiledPattern`]s keyed by pattern string and is
//! cleared whenever the filter registry changes, so a hit always reflects the
//! current registry.

use crate::config::CacheConfig;
use crate::matcher::compiled::CompiledPattern;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Bounded LRU cache of compiled patterns.
///
/// # Thread Safety
/// Lookups take the write lock because they update the LRU order. Callers
/// that compile on a miss are expected to hold the registry read lock across
/// lookup and insert, and registry writers to clear the cache under the
/// registry write lock.
#[derive(Debug)]
pub struct PatternCache {
    storage: RwLock<CacheStorage>,
    config: CacheConfig,
}

#[derive(Debug, Default)]
struct CacheStorage {
    patterns: HashMap<String, Arc<CompiledPattern>>,

    /// Access order for LRU eviction, least recent first
    access_order: Vec<String>,

    stats: CacheStats,
}

/// Cache performance statistics.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CacheStats {
    /// Total cache lookups
    pub total_lookups: usize,

    /// Cache hits
    pub hits: usize,

    /// Cache misses
    pub misses: usize,

    /// Patterns inserted
    pub insertions: usize,

    /// Evictions performed
    pub evictions: usize,

    /// Full clears caused by registry changes
    pub invalidations: usize,
}

impl PatternCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            storage: RwLock::new(CacheStorage::default()),
            config,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled && self.config.max_size > 0
    }

    /// Look up a compiled pattern, refreshing its LRU position on a hit.
    pub fn get(&self, pattern: &str) -> Option<Arc<CompiledPattern>> {
        if !self.is_enabled() {
            return None;
        }

        let mut storage = self.storage.write().unwrap_or_else(PoisonError::into_inner);
        storage.stats.total_lookups += 1;

        let Some(compiled) = storage.patterns.get(pattern).cloned() else {
            storage.stats.misses += 1;
            tracing::trace!(pattern, "pattern cache miss");
            return None;
        };

        storage.stats.hits += 1;
        if let Some(pos) = storage.access_order.iter().position(|p| p == pattern) {
            let key = storage.access_order.remove(pos);
            storage.access_order.push(key);
        }
        Some(compiled)
    }

    /// Insert a compiled pattern, evicting the least recently used entry when
    /// the cache is full.
    pub fn insert(&self, compiled: Arc<CompiledPattern>) {
        if !self.is_enabled() {
            return;
        }

        let mut storage = self.storage.write().unwrap_or_else(PoisonError::into_inner);
        let key = compiled.pattern().to_string();

        if storage.patterns.insert(key.clone(), compiled).is_some() {
            storage.access_order.retain(|p| p != &key);
        } else {
            storage.stats.insertions += 1;
        }
        storage.access_order.push(key);

        while storage.patterns.len() > self.config.max_size && !storage.access_order.is_empty() {
            let evicted = storage.access_order.remove(0);
            storage.patterns.remove(&evicted);
            storage.stats.evictions += 1;
            tracing::trace!(pattern = %evicted, "evicted compiled pattern");
        }
    }

    /// Drop every cached pattern.
    pub fn invalidate(&self) {
        let mut storage = self.storage.write().unwrap_or_else(PoisonError::into_inner);
        if storage.patterns.is_empty() {
            return;
        }
        storage.patterns.clear();
        storage.access_order.clear();
        storage.stats.invalidations += 1;
    }

    /// Drop every cached pattern and reset statistics.
    pub fn clear(&self) {
        let mut storage = self.storage.write().unwrap_or_else(PoisonError::into_inner);
        *storage = CacheStorage::default();
    }

    pub fn stats(&self) -> CacheStats {
        let storage = self.storage.read().unwrap_or_else(PoisonError::into_inner);
        storage.stats.clone()
    }

    /// Hit ratio over all lookups, 0.0 before the first lookup.
    pub fn hit_ratio(&self) -> f64 {
        let stats = self.stats();
        if stats.total_lookups == 0 {
            return 0.0;
        }
        stats.hits as f64 / stats.total_lookups as f64
    }

    pub fn len(&self) -> usize {
        let storage = self.storage.read().unwrap_or_else(PoisonError::into_inner);
        storage.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
