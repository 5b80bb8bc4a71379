//! Configuration for compiling assembled patterns.
//!
//! The builder itself has nothing to configure; these settings only govern how
//! the rendered pattern is handed to the regex engine and how many compiled
//! patterns a [`RegexCache`](crate::RegexCache) keeps around.

pub mod env;
pub mod file;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::error::{Result, VerbexError};
use crate::flags::Flags;

/// Default compiled program size limit (10 MiB).
pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Default lazy DFA cache size limit (2 MiB).
pub const DEFAULT_DFA_SIZE_LIMIT: usize = 2 * (1 << 20);

/// Default nesting depth limit.
pub const DEFAULT_NEST_LIMIT: u32 = 250;

/// Default number of compiled patterns kept by a cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Settings used when compiling a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileConfig {
    /// Approximate size limit of the compiled program, in bytes.
    pub size_limit: usize,

    /// Size limit of the lazy DFA cache, in bytes.
    pub dfa_size_limit: usize,

    /// Maximum nesting depth of the pattern syntax.
    pub nest_limit: u32,

    /// Maximum number of compiled patterns held by a cache.
    pub cache_capacity: usize,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            size_limit: DEFAULT_SIZE_LIMIT,
            dfa_size_limit: DEFAULT_DFA_SIZE_LIMIT,
            nest_limit: DEFAULT_NEST_LIMIT,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl CompileConfig {
    /// Create a configuration with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compiled program size limit.
    #[must_use]
    pub const fn size_limit(mut self, bytes: usize) -> Self {
        self.size_limit = bytes;
        self
    }

    /// Set the lazy DFA cache size limit.
    #[must_use]
    pub const fn dfa_size_limit(mut self, bytes: usize) -> Self {
        self.dfa_size_limit = bytes;
        self
    }

    /// Set the nesting depth limit.
    #[must_use]
    pub const fn nest_limit(mut self, depth: u32) -> Self {
        self.nest_limit = depth;
        self
    }

    /// Set the cache capacity.
    #[must_use]
    pub const fn cache_capacity(mut self, entries: usize) -> Self {
        self.cache_capacity = entries;
        self
    }

    /// Check that every limit is usable.
    pub fn validate(&self) -> Result<()> {
        if self.size_limit == 0 {
            return Err(VerbexError::config("size_limit must be greater than zero"));
        }
        if self.dfa_size_limit == 0 {
            return Err(VerbexError::config(
                "dfa_size_limit must be greater than zero",
            ));
        }
        if self.nest_limit == 0 {
            return Err(VerbexError::config("nest_limit must be greater than zero"));
        }
        if self.cache_capacity == 0 {
            return Err(VerbexError::config(
                "cache_capacity must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Compile `pattern` under these limits and the engine-level `flags`.
    ///
    /// # Errors
    ///
    /// Returns the engine error unchanged; callers attach the pattern.
    pub fn build(&self, pattern: &str, flags: Flags) -> std::result::Result<Regex, regex::Error> {
        let mut builder = RegexBuilder::new(pattern);
        builder
            .size_limit(self.size_limit)
            .dfa_size_limit(self.dfa_size_limit)
            .nest_limit(self.nest_limit);
        flags.apply(&mut builder);
        builder.build()
    }
}
