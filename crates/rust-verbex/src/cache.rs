//! Cache of compiled patterns.
//!
//! Builders are cheap to render but compiling is not, and the same expression
//! is often assembled repeatedly (inside loops, per request). The cache maps a
//! rendered pattern plus its engine-level flags to a shared compiled regex.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, RwLock};

use regex::Regex;

use crate::config::CompileConfig;
use crate::error::Result;
use crate::flags::Flags;

/// A cache for compiled patterns.
///
/// When full, the oldest inserted entry is evicted.
pub struct RegexCache {
    cache: RwLock<Entries>,
    config: CompileConfig,
    /// Total cache hits (for statistics).
    total_hits: AtomicUsize,
    /// Total cache misses (for statistics).
    total_misses: AtomicUsize,
}

struct Entries {
    map: HashMap<String, Arc<Regex>>,
    order: VecDeque<String>,
}

impl RegexCache {
    /// Create a cache that compiles under `config`.
    ///
    /// # Errors
    ///
    /// Returns [`VerbexError::Config`](crate::VerbexError::Config) if `config`
    /// fails [`CompileConfig::validate`], e.g. a zero `cache_capacity`.
    pub fn new(config: CompileConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: CompileConfig) -> Self {
        let capacity = config.cache_capacity;
        Self {
            cache: RwLock::new(Entries {
                map: HashMap::with_capacity(capacity),
                order: VecDeque::with_capacity(capacity),
            }),
            config,
            total_hits: AtomicUsize::new(0),
            total_misses: AtomicUsize::new(0),
        }
    }

    /// Create a cache with the default configuration.
    #[must_use]
    pub fn with_default_config() -> Self {
        Self::with_valid_config(CompileConfig::default())
    }

    /// The configuration entries are compiled under.
    #[must_use]
    pub const fn config(&self) -> &CompileConfig {
        &self.config
    }

    fn key(pattern: &str, flags: Flags) -> String {
        flags.embed(pattern)
    }

    /// Get or compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns the engine error if the pattern does not compile; failures are
    /// not cached.
    pub fn get_or_compile(
        &self,
        pattern: &str,
        flags: Flags,
    ) -> std::result::Result<Arc<Regex>, regex::Error> {
        let key = Self::key(pattern, flags);

        // The cache is only an optimization, so a poisoned lock is recovered.
        {
            let cache = self
                .cache
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if let Some(regex) = cache.map.get(&key) {
                self.total_hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(pattern = %pattern, "regex cache hit");
                return Ok(Arc::clone(regex));
            }
        }

        self.total_misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(pattern = %pattern, flags = ?flags, "regex cache miss, compiling");

        let regex = Arc::new(self.config.build(pattern, flags)?);

        let mut cache = self
            .cache
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        // Another thread may have inserted while we compiled.
        if let Some(existing) = cache.map.get(&key) {
            return Ok(Arc::clone(existing));
        }

        if cache.map.len() >= self.config.cache_capacity
            && let Some(oldest) = cache.order.pop_front()
        {
            cache.map.remove(&oldest);
        }

        cache.map.insert(key.clone(), Arc::clone(&regex));
        cache.order.push_back(key);

        Ok(regex)
    }

    /// Check if a pattern is cached under `flags`.
    #[must_use]
    pub fn contains(&self, pattern: &str, flags: Flags) -> bool {
        let cache = self
            .cache
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        cache.map.contains_key(&Self::key(pattern, flags))
    }

    /// Get the current number of cached patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        let cache = self
            .cache
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        cache.map.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear the cache.
    pub fn clear(&self) {
        let mut cache = self
            .cache
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        cache.map.clear();
        cache.order.clear();
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.len(),
            capacity: self.config.cache_capacity,
            total_hits: self.total_hits.load(Ordering::Relaxed),
            total_misses: self.total_misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for RegexCache {
    fn default() -> Self {
        Self::with_default_config()
    }
}

impl std::fmt::Debug for RegexCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegexCache")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

/// Statistics about a regex cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Current number of cached patterns.
    pub size: usize,
    /// Maximum number of cached patterns.
    pub capacity: usize,
    /// Total cache hits.
    pub total_hits: usize,
    /// Total cache misses.
    pub total_misses: usize,
}

impl CacheStats {
    /// Get the cache hit rate as a ratio (0.0 to 1.0).
    ///
    /// Returns 1.0 if no accesses have been made.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_hits + self.total_misses;
        if total == 0 {
            1.0
        } else {
            self.total_hits as f64 / total as f64
        }
    }
}

/// Process-wide cache used by [`PatternBuilder::compile`](crate::PatternBuilder::compile).
pub static GLOBAL_CACHE: LazyLock<RegexCache> = LazyLock::new(RegexCache::with_default_config);
