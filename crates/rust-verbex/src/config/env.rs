//! Environment-based configuration.
//!
//! Nothing here runs unless the caller asks for it via
//! [`CompileConfig::from_env`].

use std::collections::HashMap;
use std::str::FromStr;

use super::CompileConfig;
use crate::error::{Result, VerbexError};

/// Environment configuration prefix.
pub const DEFAULT_PREFIX: &str = "VERBEX";

/// Environment variable reader.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Prefix for environment variables.
    prefix: String,
    /// Values that take precedence over the process environment.
    overrides: HashMap<String, String>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl EnvConfig {
    /// Create a new environment config reader.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            overrides: HashMap::new(),
        }
    }

    /// Set a value that shadows the process environment.
    #[must_use]
    pub fn with_override(mut self, name: &str, value: impl Into<String>) -> Self {
        self.overrides.insert(self.var_name(name), value.into());
        self
    }

    /// Build the full environment variable name.
    fn var_name(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_uppercase()
        } else {
            format!("{}_{}", self.prefix, name.to_uppercase())
        }
    }

    /// Get a string value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        let var_name = self.var_name(name);
        self.overrides
            .get(&var_name)
            .cloned()
            .or_else(|| std::env::var(&var_name).ok())
    }

    /// Get a parsed value, failing loudly on a malformed one.
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<Option<T>> {
        let Some(raw) = self.get(name) else {
            return Ok(None);
        };
        raw.trim().parse().map(Some).map_err(|_| {
            VerbexError::config(format!("{} has invalid value {raw:?}", self.var_name(name)))
        })
    }

    /// Overlay every variable that is set onto `base`.
    pub fn apply(&self, base: CompileConfig) -> Result<CompileConfig> {
        let mut config = base;
        if let Some(v) = self.parse(vars::SIZE_LIMIT)? {
            config.size_limit = v;
        }
        if let Some(v) = self.parse(vars::DFA_SIZE_LIMIT)? {
            config.dfa_size_limit = v;
        }
        if let Some(v) = self.parse(vars::NEST_LIMIT)? {
            config.nest_limit = v;
        }
        if let Some(v) = self.parse(vars::CACHE_CAPACITY)? {
            config.cache_capacity = v;
        }
        config.validate()?;
        Ok(config)
    }
}

impl CompileConfig {
    /// Read `VERBEX_*` variables on top of the defaults.
    pub fn from_env() -> Result<Self> {
        EnvConfig::default().apply(Self::default())
    }
}

/// Recognised variable names (without prefix).
pub mod vars {
    /// Compiled program size limit in bytes.
    pub const SIZE_LIMIT: &str = "SIZE_LIMIT";
    /// Lazy DFA cache size limit in bytes.
    pub const DFA_SIZE_LIMIT: &str = "DFA_SIZE_LIMIT";
    /// Syntax nesting limit.
    pub const NEST_LIMIT: &str = "NEST_LIMIT";
    /// Compiled pattern cache capacity.
    pub const CACHE_CAPACITY: &str = "CACHE_CAPACITY";
}
