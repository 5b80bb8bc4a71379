//! Error types for rust-verbex.
//!
//! Append operations on a [`PatternBuilder`](crate::PatternBuilder) never fail
//! on well-typed input; the few that carry value-level contracts (ranges, group
//! names) reject bad values before touching builder state. Compiling is the only
//! step that talks to the regex engine, and its failures always carry the
//! rendered pattern so the caller can see exactly what was assembled.

use thiserror::Error;

/// Maximum length of a rendered pattern to display in error messages.
const MAX_PATTERN_DISPLAY: usize = 200;

/// Shorten a pattern for display, keeping its head.
fn format_pattern_snippet(pattern: &str) -> String {
    if pattern.chars().count() <= MAX_PATTERN_DISPLAY {
        return format!("'{pattern}'");
    }

    let head: String = pattern.chars().take(MAX_PATTERN_DISPLAY).collect();
    format!("'{head}...' ({} bytes total)", pattern.len())
}

/// Format a syntax rejection with the offending pattern.
fn format_pattern_error(pattern: &str, source: &regex::Error) -> String {
    format!(
        "assembled pattern was rejected by the regex engine\n\
         \n\
         Pattern: {}\n\
         \n\
         {source}",
        format_pattern_snippet(pattern)
    )
}

/// Format a size-limit rejection.
fn format_too_big_error(pattern: &str, limit: usize) -> String {
    format!(
        "compiled pattern exceeds the size limit of {limit} bytes\n\
         \n\
         Pattern: {}\n\
         \n\
         Tip: raise `size_limit` in the compile configuration or split the expression.",
        format_pattern_snippet(pattern)
    )
}

/// The main error type for rust-verbex operations.
#[derive(Debug, Error)]
pub enum VerbexError {
    /// A builder operation received a value outside its contract.
    #[error("contract violation in `{operation}`: {message}")]
    ContractViolation {
        /// The builder operation that rejected its input.
        operation: &'static str,
        /// What was wrong with the input.
        message: String,
    },

    /// The regex engine rejected the syntax of the assembled pattern.
    #[error("{}", format_pattern_error(pattern, source))]
    Pattern {
        /// The rendered pattern that failed to compile.
        pattern: String,
        /// The engine error.
        #[source]
        source: regex::Error,
    },

    /// The assembled pattern is well formed but too large to compile.
    #[error("{}", format_too_big_error(pattern, *limit))]
    CompiledTooBig {
        /// The rendered pattern that failed to compile.
        pattern: String,
        /// The size limit that was exceeded.
        limit: usize,
    },

    /// Invalid configuration value.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// A configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that was being read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for rust-verbex operations.
pub type Result<T> = std::result::Result<T, VerbexError>;

impl VerbexError {
    /// Create a contract violation error.
    pub fn contract(operation: &'static str, message: impl Into<String>) -> Self {
        Self::ContractViolation {
            operation,
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Wrap an engine error together with the pattern that caused it.
    ///
    /// Size-limit failures are kept apart from syntax failures so callers can
    /// tell an unrepresentable expression from an engine resource limit.
    pub fn from_regex(pattern: impl Into<String>, source: regex::Error) -> Self {
        let pattern = pattern.into();
        match source {
            regex::Error::CompiledTooBig(limit) => Self::CompiledTooBig { pattern, limit },
            source => Self::Pattern { pattern, source },
        }
    }

    /// Check if this is a contract violation.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(self, Self::ContractViolation { .. })
    }

    /// Check if this error came from compiling an assembled pattern.
    #[must_use]
    pub const fn is_pattern_error(&self) -> bool {
        matches!(self, Self::Pattern { .. } | Self::CompiledTooBig { .. })
    }

    /// Get the rendered pattern if this error carries one.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::Pattern { pattern, .. } | Self::CompiledTooBig { pattern, .. } => Some(pattern),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syntax_error() -> regex::Error {
        regex::Regex::new("(unclosed").unwrap_err()
    }

    #[test]
    fn contract_display() {
        let err = VerbexError::contract("letter_range", "start 'z' is after end 'a'");
        let msg = err.to_string();
        assert!(msg.contains("letter_range"));
        assert!(msg.contains("after end"));
        assert!(err.is_contract_violation());
        assert!(!err.is_pattern_error());
    }

    #[test]
    fn pattern_error_carries_pattern() {
        let err = VerbexError::from_regex("(unclosed", syntax_error());
        assert!(err.is_pattern_error());
        assert_eq!(err.pattern(), Some("(unclosed"));
        assert!(err.to_string().contains("Pattern: '(unclosed'"));
    }

    #[test]
    fn too_big_is_distinct() {
        let err = VerbexError::from_regex("a{1000}", regex::Error::CompiledTooBig(64));
        assert!(matches!(err, VerbexError::CompiledTooBig { limit: 64, .. }));
        assert!(err.to_string().contains("Tip:"));
    }

    #[test]
    fn long_pattern_is_truncated() {
        let long = "a".repeat(500);
        let err = VerbexError::from_regex(long, syntax_error());
        let msg = err.to_string();
        assert!(msg.contains("500 bytes total"));
        assert!(!msg.contains(&"a".repeat(300)));
    }

    #[test]
    fn config_error_has_no_pattern() {
        let err = VerbexError::config("size_limit must be non-zero");
        assert!(err.pattern().is_none());
        assert!(err.to_string().starts_with("configuration error"));
    }
}
