//! The fluent pattern builder.
//!
//! A [`PatternBuilder`] accumulates three fragments: a prefix (the start
//! anchor), the body, and a suffix (the end anchor). Every operation appends
//! one balanced fragment to the body, so no group or class is ever left open
//! between calls and the rendered pattern is always well formed.
//!
//! Two pieces of bookkeeping avoid re-parsing the body:
//!
//! - the span of the last appended fragment, so that
//!   [`multiple`](PatternBuilder::multiple) with empty text and
//!   [`as_few`](PatternBuilder::as_few) act on exactly that fragment;
//! - the offset where the current alternative starts, maintained by
//!   [`or`](PatternBuilder::or).
//!
//! # Example
//!
//! ```
//! use rust_verbex::PatternBuilder;
//!
//! let mut url = PatternBuilder::new();
//! url.start_of_line(true)
//!     .find("http")
//!     .maybe("s")
//!     .find("://")
//!     .maybe("www.")
//!     .anything_but(" ")
//!     .end_of_line(true);
//!
//! assert_eq!(url.render(), r"^(http)(s)?(://)(www\.)?([^ ]+)$");
//!
//! let matcher = url.compile().unwrap();
//! assert!(matcher.test("https://www.google.com"));
//! assert!(!matcher.test("https://www google.com"));
//! ```

use std::fmt;

use crate::cache::{GLOBAL_CACHE, RegexCache};
use crate::config::CompileConfig;
use crate::error::{Result, VerbexError};
use crate::escape::escape_class;
use crate::flags::Flags;
use crate::matcher::Matcher;
use crate::term::{CharSet, Term};
use crate::validation::{validate_group_name, validate_range};

/// Most numbers a single [`PatternBuilder::number_range`] call may cover.
pub const MAX_NUMBER_RANGE: u32 = 10_000;

/// A class with no members; matches nothing.
const EMPTY_CLASS: &str = "[a&&b]";

/// Any single character, newline included.
const ANY_CHAR: &str = "(?s:.)";

/// Where the most recently appended fragment sits in the body.
///
/// The fragment always ends at the end of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    /// A quantifier may follow the fragment directly.
    atomic: bool,
    /// Offset right after the fragment's quantifier, where `?` makes it lazy.
    lazy_at: Option<usize>,
}

/// A fragment about to be appended.
struct Fragment {
    text: String,
    atomic: bool,
    /// Laziness insertion point, relative to the fragment start.
    lazy_at: Option<usize>,
}

impl Fragment {
    /// A group, class or escape that takes a quantifier directly.
    fn atom(text: String) -> Self {
        Self {
            text,
            atomic: true,
            lazy_at: None,
        }
    }

    /// A group whose body ends with a quantifier, e.g. `(.*)`.
    fn inner_quantified(text: String) -> Self {
        let at = text.len() - 1;
        Self {
            text,
            atomic: true,
            lazy_at: Some(at),
        }
    }

    /// Anything ending with a quantifier, e.g. `(x)?` or `\w+`.
    fn quantified(text: String) -> Self {
        let at = text.len();
        Self {
            text,
            atomic: false,
            lazy_at: Some(at),
        }
    }
}

/// Builds a regular expression from chained, descriptive calls.
///
/// Operations mutate the builder in place and return `&mut Self` so they chain.
/// The few operations with value-level contracts return `Result<&mut Self>`
/// and leave the builder untouched on error, so they chain with `?`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternBuilder {
    prefix: String,
    source: String,
    suffix: String,
    flags: Flags,
    last: Option<Span>,
    branch_start: usize,
    alternation: bool,
    group_names: Vec<String>,
}

impl PatternBuilder {
    /// Create an empty builder with no flags.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with `flags` already set.
    #[must_use]
    pub fn with_flags(flags: Flags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }

    fn push(&mut self, operation: &'static str, fragment: Fragment) -> &mut Self {
        let start = self.source.len();
        self.source.push_str(&fragment.text);
        self.last = Some(Span {
            start,
            atomic: fragment.atomic,
            lazy_at: fragment.lazy_at.map(|offset| start + offset),
        });
        tracing::trace!(operation, fragment = %fragment.text, "appended fragment");
        self
    }

    // ---------------------------------------------------------------------
    // Anchors
    // ---------------------------------------------------------------------

    /// Anchor the pattern at the start of the line (or input).
    pub fn start_of_line(&mut self, enable: bool) -> &mut Self {
        self.prefix = if enable { "^" } else { "" }.to_string();
        self
    }

    /// Anchor the pattern at the end of the line (or input).
    pub fn end_of_line(&mut self, enable: bool) -> &mut Self {
        self.suffix = if enable { "$" } else { "" }.to_string();
        self
    }

    // ---------------------------------------------------------------------
    // Literal text
    // ---------------------------------------------------------------------

    /// Match `text` as a capturing group.
    ///
    /// `find("")` appends `()`, which matches the empty string.
    pub fn find(&mut self, text: impl Into<Term>) -> &mut Self {
        let term = text.into();
        self.push("find", Fragment::atom(format!("({})", term.render())))
    }

    /// Alias for [`find`](Self::find).
    pub fn then(&mut self, text: impl Into<Term>) -> &mut Self {
        self.find(text)
    }

    /// Optionally match `text`.
    pub fn maybe(&mut self, text: impl Into<Term>) -> &mut Self {
        let term = text.into();
        self.push("maybe", Fragment::quantified(format!("({})?", term.render())))
    }

    /// Match `text` as an unnamed capture group.
    pub fn capture_group(&mut self, text: impl Into<Term>) -> &mut Self {
        let term = text.into();
        self.push(
            "capture_group",
            Fragment::atom(format!("({})", term.render())),
        )
    }

    /// Match `text` as a named capture group.
    ///
    /// # Errors
    ///
    /// Returns a contract violation if `name` is not an identifier or is
    /// already used in this builder.
    pub fn named_group(&mut self, name: &str, text: impl Into<Term>) -> Result<&mut Self> {
        validate_group_name(name)?;
        self.ensure_unused("named_group", name)?;

        let term = text.into();
        self.group_names.push(name.to_string());
        Ok(self.push(
            "named_group",
            Fragment::atom(format!("(?P<{name}>{})", term.render())),
        ))
    }

    /// Embed another builder's pattern as a capturing group.
    ///
    /// The inner builder's case and line flags travel with it inline
    /// (`(?i:...)`); its anchors are kept as written. Its named groups become
    /// names of this builder, so a builder that names a group can be embedded
    /// only once.
    ///
    /// # Errors
    ///
    /// Returns a contract violation if `inner` uses a group name that is
    /// already used in this builder.
    pub fn subpattern(&mut self, inner: &Self) -> Result<&mut Self> {
        for name in &inner.group_names {
            self.ensure_unused("subpattern", name)?;
        }

        self.group_names.extend(inner.group_names.iter().cloned());
        let text = format!("({})", inner.flags.embed(&inner.render()));
        Ok(self.push("subpattern", Fragment::atom(text)))
    }

    fn ensure_unused(&self, operation: &'static str, name: &str) -> Result<()> {
        if self.group_names.iter().any(|existing| existing == name) {
            return Err(VerbexError::contract(
                operation,
                format!("group name {name:?} is already used"),
            ));
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Character classes
    // ---------------------------------------------------------------------

    /// Match one or more characters that are not in `chars`.
    ///
    /// With an empty set every character qualifies, newline included.
    pub fn anything_but(&mut self, chars: impl Into<CharSet>) -> &mut Self {
        let set = chars.into();
        let text = if set.is_empty() {
            format!("({ANY_CHAR}+)")
        } else {
            format!("([^{}]+)", set.render())
        };
        self.push("anything_but", Fragment::inner_quantified(text))
    }

    /// Match exactly one character from `chars`.
    ///
    /// An empty set matches nothing.
    pub fn any_of(&mut self, chars: impl Into<CharSet>) -> &mut Self {
        let set = chars.into();
        let text = if set.is_empty() {
            EMPTY_CLASS.to_string()
        } else {
            format!("[{}]", set.render())
        };
        self.push("any_of", Fragment::atom(text))
    }

    /// Match exactly one character that is not in `chars`.
    pub fn not_any_of(&mut self, chars: impl Into<CharSet>) -> &mut Self {
        let set = chars.into();
        let text = if set.is_empty() {
            ANY_CHAR.to_string()
        } else {
            format!("[^{}]", set.render())
        };
        self.push("not_any_of", Fragment::atom(text))
    }

    /// Match one character between `start` and `end`, inclusive.
    ///
    /// # Errors
    ///
    /// Returns a contract violation if `start` comes after `end`.
    pub fn letter_range(&mut self, start: char, end: char) -> Result<&mut Self> {
        validate_range("letter_range", start, end)?;
        let text = format!(
            "[{}-{}]",
            escape_class(start.encode_utf8(&mut [0; 4])),
            escape_class(end.encode_utf8(&mut [0; 4]))
        );
        Ok(self.push("letter_range", Fragment::atom(text)))
    }

    /// Match any whole number from `start` to `end`, inclusive.
    ///
    /// Every number in the range becomes one alternative, emitted largest
    /// first so that, under leftmost-first matching, `10` is preferred over its
    /// prefix `1`. At most [`MAX_NUMBER_RANGE`] alternatives are emitted.
    ///
    /// # Errors
    ///
    /// Returns a contract violation if `start` is greater than `end`, or if the
    /// range holds more than [`MAX_NUMBER_RANGE`] numbers.
    pub fn number_range(&mut self, start: u32, end: u32) -> Result<&mut Self> {
        validate_range("number_range", start, end)?;
        if end - start >= MAX_NUMBER_RANGE {
            return Err(VerbexError::contract(
                "number_range",
                format!(
                    "range {start}..={end} holds more than {MAX_NUMBER_RANGE} numbers"
                ),
            ));
        }
        let alternatives: Vec<String> = (start..=end).rev().map(|n| n.to_string()).collect();
        let text = format!("(?:{})", alternatives.join("|"));
        Ok(self.push("number_range", Fragment::atom(text)))
    }

    // ---------------------------------------------------------------------
    // Shorthands
    // ---------------------------------------------------------------------

    /// Match any run of characters, including none.
    pub fn anything(&mut self) -> &mut Self {
        self.push("anything", Fragment::inner_quantified("(.*)".to_string()))
    }

    /// Match any run of at least one character.
    pub fn something(&mut self) -> &mut Self {
        self.push("something", Fragment::inner_quantified("(.+)".to_string()))
    }

    /// Match a line break, CRLF or LF.
    pub fn line_break(&mut self) -> &mut Self {
        self.push("line_break", Fragment::atom(r"(\r\n|\n)".to_string()))
    }

    /// Alias for [`line_break`](Self::line_break).
    pub fn br(&mut self) -> &mut Self {
        self.line_break()
    }

    /// Match a tab character.
    pub fn tab(&mut self) -> &mut Self {
        self.push("tab", Fragment::atom(r"\t".to_string()))
    }

    /// Match one or more word characters.
    pub fn word(&mut self) -> &mut Self {
        self.push("word", Fragment::quantified(r"\w+".to_string()))
    }

    // ---------------------------------------------------------------------
    // Repetition
    // ---------------------------------------------------------------------

    /// Match `text` one or more times, or zero or more when `optional`.
    ///
    /// With empty text the quantifier applies to the previously appended
    /// fragment instead: `find("bird").multiple("", false)` renders `(bird)+`.
    /// If nothing has been appended yet (or an [`or`](Self::or) was just
    /// started) there is nothing to repeat and the call does nothing.
    pub fn multiple(&mut self, text: impl Into<Term>, optional: bool) -> &mut Self {
        let quantifier = if optional { "*" } else { "+" };
        let term = text.into();
        if term.is_empty() {
            return self.quantify_last("multiple", quantifier);
        }
        self.push(
            "multiple",
            Fragment::quantified(format!("({}){quantifier}", term.render())),
        )
    }

    fn quantify_last(&mut self, operation: &'static str, quantifier: &str) -> &mut Self {
        let Some(span) = self.last else {
            tracing::debug!(operation, "no preceding fragment to repeat");
            return self;
        };

        if !span.atomic {
            self.source.insert_str(span.start, "(?:");
            self.source.push(')');
        }
        self.source.push_str(quantifier);
        self.last = Some(Span {
            start: span.start,
            atomic: false,
            lazy_at: Some(self.source.len()),
        });
        tracing::trace!(operation, quantifier, "quantified previous fragment");
        self
    }

    /// Match `text` one or more times, without capturing.
    pub fn one_or_more(&mut self, text: impl Into<Term>) -> &mut Self {
        self.repeat("one_or_more", text.into(), "+")
    }

    /// Match `text` zero or more times, without capturing.
    pub fn zero_or_more(&mut self, text: impl Into<Term>) -> &mut Self {
        self.repeat("zero_or_more", text.into(), "*")
    }

    /// Match `text` exactly `n` times.
    pub fn n_times(&mut self, text: impl Into<Term>, n: u32) -> &mut Self {
        self.repeat("n_times", text.into(), &format!("{{{n}}}"))
    }

    /// Match `text` at least `n` times.
    pub fn n_times_or_more(&mut self, text: impl Into<Term>, n: u32) -> &mut Self {
        self.repeat("n_times_or_more", text.into(), &format!("{{{n},}}"))
    }

    /// Match `text` between `n` and `m` times, inclusive.
    ///
    /// # Errors
    ///
    /// Returns a contract violation if `n` is greater than `m`.
    pub fn n_to_m_times(&mut self, text: impl Into<Term>, n: u32, m: u32) -> Result<&mut Self> {
        validate_range("n_to_m_times", n, m)?;
        Ok(self.repeat("n_to_m_times", text.into(), &format!("{{{n},{m}}}")))
    }

    fn repeat(&mut self, operation: &'static str, term: Term, quantifier: &str) -> &mut Self {
        self.push(
            operation,
            Fragment::quantified(format!("(?:{}){quantifier}", term.render())),
        )
    }

    /// Make the last appended quantifier lazy (match as few as possible).
    ///
    /// Does nothing if the last fragment has no quantifier or is already lazy.
    pub fn as_few(&mut self) -> &mut Self {
        match self.last.as_mut().and_then(|span| span.lazy_at.take()) {
            Some(at) => self.source.insert(at, '?'),
            None => tracing::debug!("as_few: previous fragment has no quantifier to relax"),
        }
        self
    }

    // ---------------------------------------------------------------------
    // Alternation
    // ---------------------------------------------------------------------

    /// Start a new alternative.
    ///
    /// Everything appended so far forms the previous alternative as a whole.
    /// When rendered, the body becomes `(?:first|second|...)` so both anchors
    /// apply to every alternative. Calling `or` again before anything was
    /// added to the current alternative has no effect.
    pub fn or(&mut self) -> &mut Self {
        if self.alternation && self.branch_start == self.source.len() {
            tracing::debug!("or: current alternative is empty, ignoring");
            return self;
        }
        self.source.push('|');
        self.branch_start = self.source.len();
        self.alternation = true;
        self.last = None;
        tracing::trace!(branch_start = self.branch_start, "started alternative");
        self
    }

    /// Start a new alternative that matches `text`.
    pub fn or_find(&mut self, text: impl Into<Term>) -> &mut Self {
        self.or().find(text)
    }

    // ---------------------------------------------------------------------
    // Flags
    // ---------------------------------------------------------------------

    /// Ignore letter case when matching.
    pub fn with_any_case(&mut self, enable: bool) -> &mut Self {
        self.flags.set(Flags::CASE_INSENSITIVE, enable);
        self
    }

    /// Treat the input as a single line: `.` also matches `\n`.
    pub fn search_one_line(&mut self, enable: bool) -> &mut Self {
        self.flags.set(Flags::SINGLE_LINE, enable);
        self
    }

    /// Let `^` and `$` match at every line boundary.
    pub fn search_by_line(&mut self, enable: bool) -> &mut Self {
        self.flags.set(Flags::MULTILINE, enable);
        self
    }

    /// Apply replacements and matches to every occurrence.
    pub fn global(&mut self, enable: bool) -> &mut Self {
        self.flags.set(Flags::GLOBAL, enable);
        self
    }

    // ---------------------------------------------------------------------
    // Output
    // ---------------------------------------------------------------------

    /// The active flags.
    #[must_use]
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    /// The anchor fragment rendered before the body.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The accumulated body, without the alternation wrapper.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The anchor fragment rendered after the body.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The part of the body belonging to the current alternative.
    #[must_use]
    pub fn current_branch(&self) -> &str {
        &self.source[self.branch_start..]
    }

    /// Render the pattern string.
    #[must_use]
    pub fn render(&self) -> String {
        if self.alternation {
            format!("{}(?:{}){}", self.prefix, self.source, self.suffix)
        } else {
            format!("{}{}{}", self.prefix, self.source, self.suffix)
        }
    }

    /// Compile the pattern through the process-wide cache.
    ///
    /// # Errors
    ///
    /// Returns [`VerbexError::Pattern`] or [`VerbexError::CompiledTooBig`]
    /// carrying the rendered pattern if the engine rejects it.
    pub fn compile(&self) -> Result<Matcher> {
        self.compile_with(&GLOBAL_CACHE)
    }

    /// Compile the pattern through `cache`.
    pub fn compile_with(&self, cache: &RegexCache) -> Result<Matcher> {
        let pattern = self.render();
        match cache.get_or_compile(&pattern, self.flags) {
            Ok(regex) => {
                tracing::debug!(pattern = %pattern, flags = ?self.flags, "compiled pattern");
                Ok(Matcher::from_parts(pattern, self.flags, regex))
            }
            Err(source) => {
                tracing::warn!(pattern = %pattern, error = %source, "regex engine rejected pattern");
                Err(VerbexError::from_regex(pattern, source))
            }
        }
    }

    /// Compile the pattern under `config`, bypassing any cache.
    ///
    /// # Errors
    ///
    /// Returns [`VerbexError::Config`] if `config` is unusable, otherwise the
    /// same errors as [`compile`](Self::compile).
    pub fn compile_uncached(&self, config: &CompileConfig) -> Result<Matcher> {
        Matcher::new(self.render(), self.flags, config)
    }
}

impl fmt::Display for PatternBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
