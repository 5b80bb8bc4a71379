//! Compiled matchers.
//!
//! A [`Matcher`] is the immutable result of compiling a builder. All matching
//! is delegated to the `regex` crate; the matcher only adds the builder's
//! `GLOBAL` semantics on top (first occurrence vs. every occurrence).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use regex::{Captures, NoExpand, Regex};

use crate::config::CompileConfig;
use crate::error::{Result, VerbexError};
use crate::flags::Flags;

/// A compiled pattern together with the flags it was built with.
#[derive(Clone)]
pub struct Matcher {
    pattern: String,
    flags: Flags,
    regex: Arc<Regex>,
}

impl Matcher {
    /// Compile `pattern` directly, bypassing any cache.
    ///
    /// # Errors
    ///
    /// Returns [`VerbexError::Config`] if `config` fails
    /// [`CompileConfig::validate`], otherwise the engine error with `pattern`
    /// attached.
    pub fn new(pattern: impl Into<String>, flags: Flags, config: &CompileConfig) -> Result<Self> {
        config.validate()?;
        let pattern = pattern.into();
        match config.build(&pattern, flags) {
            Ok(regex) => Ok(Self::from_parts(pattern, flags, Arc::new(regex))),
            Err(source) => Err(VerbexError::from_regex(pattern, source)),
        }
    }

    pub(crate) const fn from_parts(pattern: String, flags: Flags, regex: Arc<Regex>) -> Self {
        Self {
            pattern,
            flags,
            regex,
        }
    }

    /// The rendered pattern this matcher was compiled from.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The flags this matcher was compiled with.
    #[must_use]
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    /// The underlying compiled regex.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Whether the pattern matches anywhere in `text`.
    #[must_use]
    pub fn test(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The first match in `text`, with its capture groups.
    #[must_use]
    pub fn find(&self, text: &str) -> Option<PatternMatch> {
        self.regex
            .captures(text)
            .map(|caps| PatternMatch::from_captures(&self.regex, &caps))
    }

    /// Alias for [`find`](Self::find) that reads better when groups are wanted.
    #[must_use]
    pub fn captures(&self, text: &str) -> Option<PatternMatch> {
        self.find(text)
    }

    /// Every non-overlapping match in `text`.
    #[must_use]
    pub fn find_all(&self, text: &str) -> Vec<PatternMatch> {
        self.regex
            .captures_iter(text)
            .map(|caps| PatternMatch::from_captures(&self.regex, &caps))
            .collect()
    }

    /// Matches in `text`: all of them when `GLOBAL` is set, otherwise at most one.
    #[must_use]
    pub fn matches(&self, text: &str) -> Vec<PatternMatch> {
        if self.is_global() {
            self.find_all(text)
        } else {
            self.find(text).into_iter().collect()
        }
    }

    /// Replace matches in `text`, expanding `$1` / `$name` in `replacement`.
    ///
    /// Every occurrence is replaced when `GLOBAL` is set, otherwise only the
    /// first.
    #[must_use]
    pub fn replace(&self, text: &str, replacement: &str) -> String {
        if self.is_global() {
            self.regex.replace_all(text, replacement).into_owned()
        } else {
            self.regex.replace(text, replacement).into_owned()
        }
    }

    /// Replace matches in `text` with `replacement` taken verbatim.
    #[must_use]
    pub fn replace_literal(&self, text: &str, replacement: &str) -> String {
        if self.is_global() {
            self.regex.replace_all(text, NoExpand(replacement)).into_owned()
        } else {
            self.regex.replace(text, NoExpand(replacement)).into_owned()
        }
    }

    /// Split `text` on every match.
    #[must_use]
    pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.regex.split(text).collect()
    }

    const fn is_global(&self) -> bool {
        self.flags.contains(Flags::GLOBAL)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("pattern", &self.pattern)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Result of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// Start byte offset of the match.
    pub start: usize,
    /// End byte offset of the match.
    pub end: usize,
    /// The matched text.
    pub text: String,
    /// Capture groups 1..n; `None` for groups that did not participate.
    pub groups: Vec<Option<String>>,
    /// Named capture groups that participated in the match.
    pub named: HashMap<String, String>,
}

impl PatternMatch {
    fn from_captures(regex: &Regex, caps: &Captures<'_>) -> Self {
        let whole = caps.get(0);
        let groups = caps
            .iter()
            .skip(1) // Skip the full match
            .map(|m| m.map(|m| m.as_str().to_string()))
            .collect();
        let named = regex
            .capture_names()
            .flatten()
            .filter_map(|name| {
                caps.name(name)
                    .map(|m| (name.to_string(), m.as_str().to_string()))
            })
            .collect();

        Self {
            start: whole.map_or(0, |m| m.start()),
            end: whole.map_or(0, |m| m.end()),
            text: whole.map(|m| m.as_str().to_string()).unwrap_or_default(),
            groups,
            named,
        }
    }

    /// Get capture group `index` (1-based), if it participated.
    #[must_use]
    pub fn group(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.groups.get(i))
            .and_then(Option::as_deref)
    }

    /// Get a named capture group, if it participated.
    #[must_use]
    pub fn name(&self, name: &str) -> Option<&str> {
        self.named.get(name).map(String::as_str)
    }

    /// Length of the match in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the match is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(pattern: &str, flags: Flags) -> Matcher {
        Matcher::new(pattern, flags, &CompileConfig::default()).unwrap()
    }

    #[test]
    fn test_and_find() {
        let m = matcher(r"(\d+)-(\d+)", Flags::empty());
        assert!(m.test("call 555-1234"));
        let found = m.find("call 555-1234").unwrap();
        assert_eq!(found.text, "555-1234");
        assert_eq!(found.start, 5);
        assert_eq!(found.group(1), Some("555"));
        assert_eq!(found.group(2), Some("1234"));
        assert_eq!(found.group(0), None);
    }

    #[test]
    fn non_participating_group_is_none() {
        let m = matcher("(a)|(b)", Flags::empty());
        let found = m.find("b").unwrap();
        assert_eq!(found.groups, vec![None, Some("b".to_string())]);
    }

    #[test]
    fn named_groups_are_collected() {
        let m = matcher(r"(?P<user>\w+)@(?P<host>\w+)", Flags::empty());
        let found = m.find("mail alice@example now").unwrap();
        assert_eq!(found.name("user"), Some("alice"));
        assert_eq!(found.name("host"), Some("example"));
        assert_eq!(found.name("port"), None);
    }

    #[test]
    fn global_controls_replace_and_matches() {
        let first = matcher("o", Flags::empty());
        let every = matcher("o", Flags::GLOBAL);
        assert_eq!(first.replace("foo boo", "0"), "f0o boo");
        assert_eq!(every.replace("foo boo", "0"), "f00 b00");
        assert_eq!(first.matches("foo").len(), 1);
        assert_eq!(every.matches("foo").len(), 2);
        assert_eq!(first.find_all("foo").len(), 2);
    }

    #[test]
    fn replace_expands_groups_but_literal_does_not() {
        let m = matcher(r"(\w+)@", Flags::empty());
        assert_eq!(m.replace("bob@host", "$1 at "), "bob at host");
        assert_eq!(m.replace_literal("bob@host", "$1 at "), "$1 at host");
    }

    #[test]
    fn split_on_matches() {
        let m = matcher(r",\s*", Flags::empty());
        assert_eq!(m.split("a, b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn invalid_config_is_rejected_before_compiling() {
        let config = CompileConfig::new().size_limit(0);
        let err = Matcher::new("a", Flags::empty(), &config).unwrap_err();
        assert!(matches!(err, VerbexError::Config { .. }));
        assert_eq!(err.pattern(), None);
    }

    #[test]
    fn invalid_pattern_keeps_pattern() {
        let err = Matcher::new("(open", Flags::empty(), &CompileConfig::default()).unwrap_err();
        assert_eq!(err.pattern(), Some("(open"));
    }
}
