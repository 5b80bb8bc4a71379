//! File-based configuration loading.
//!
//! Configuration documents are TOML. Missing keys keep their defaults and
//! unknown keys are rejected, so a typo never silently falls back to a default.

use std::path::Path;

use super::CompileConfig;
use crate::error::{Result, VerbexError};

impl CompileConfig {
    /// Parse a TOML document.
    ///
    /// ```toml
    /// size_limit = 1048576
    /// cache_capacity = 32
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| VerbexError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let config = CompileConfig::from_toml_str("cache_capacity = 8\n").unwrap();
        assert_eq!(config.cache_capacity, 8);
        assert_eq!(config.size_limit, super::super::DEFAULT_SIZE_LIMIT);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(
            CompileConfig::from_toml_str("").unwrap(),
            CompileConfig::default()
        );
    }

    #[test]
    fn unknown_key_rejected() {
        let err = CompileConfig::from_toml_str("size_limt = 10\n").unwrap_err();
        assert!(matches!(err, VerbexError::ConfigParse(_)));
    }

    #[test]
    fn zero_limit_rejected() {
        let err = CompileConfig::from_toml_str("nest_limit = 0\n").unwrap_err();
        assert!(matches!(err, VerbexError::Config { .. }));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = CompileConfig::from_file("/nonexistent/verbex.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/verbex.toml"));
    }
}
