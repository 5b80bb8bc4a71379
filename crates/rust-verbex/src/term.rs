//! Inputs accepted by builder operations.
//!
//! Operations that place text in the pattern body take a [`Term`]; operations
//! that build a bracket class take a [`CharSet`]. Keeping the two apart means a
//! value that cannot live inside a class (a line break) is rejected by the type
//! checker rather than producing a broken class.
//!
//! Another builder is not a `Term`: its named groups have to be checked against
//! the outer builder, so it is embedded through
//! [`PatternBuilder::subpattern`](crate::PatternBuilder::subpattern).

use std::fmt;

use crate::escape::{escape_class, escape_literal};

/// Predefined character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// A decimal digit.
    Digit,
    /// A word character (letter, digit or underscore).
    Word,
    /// Any whitespace character.
    Whitespace,
    /// A tab character.
    Tab,
    /// An uppercase letter.
    UppercaseLetter,
    /// A lowercase letter.
    LowercaseLetter,
}

impl CharClass {
    /// The class escape, valid both inside and outside brackets.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Digit => r"\d",
            Self::Word => r"\w",
            Self::Whitespace => r"\s",
            Self::Tab => r"\t",
            Self::UppercaseLetter => r"\p{Lu}",
            Self::LowercaseLetter => r"\p{Ll}",
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Special characters and anchors usable in the pattern body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialChar {
    /// A line break, CRLF or LF.
    LineBreak,
    /// Start of line anchor.
    StartOfLine,
    /// End of line anchor.
    EndOfLine,
    /// A tab character.
    Tab,
}

impl SpecialChar {
    /// The pattern fragment for this character.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LineBreak => r"(?:\r\n|\n)",
            Self::StartOfLine => "^",
            Self::EndOfLine => "$",
            Self::Tab => r"\t",
        }
    }
}

impl fmt::Display for SpecialChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something to place in the pattern body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Text matched verbatim.
    Literal(String),
    /// A predefined character class.
    Class(CharClass),
    /// A special character or anchor.
    Special(SpecialChar),
}

impl Term {
    /// Render the term as a balanced pattern fragment.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Literal(text) => escape_literal(text),
            Self::Class(class) => class.as_str().to_string(),
            Self::Special(special) => special.as_str().to_string(),
        }
    }

    /// Whether this is empty literal text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Literal(text) if text.is_empty())
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Self::Literal(s.to_string())
    }
}

impl From<String> for Term {
    fn from(s: String) -> Self {
        Self::Literal(s)
    }
}

impl From<&String> for Term {
    fn from(s: &String) -> Self {
        Self::Literal(s.clone())
    }
}

impl From<char> for Term {
    fn from(c: char) -> Self {
        Self::Literal(c.to_string())
    }
}

impl From<CharClass> for Term {
    fn from(class: CharClass) -> Self {
        Self::Class(class)
    }
}

impl From<SpecialChar> for Term {
    fn from(special: SpecialChar) -> Self {
        Self::Special(special)
    }
}

/// Members of a bracket class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharSet {
    chars: String,
    classes: Vec<CharClass>,
}

impl CharSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add literal characters.
    #[must_use]
    pub fn with_chars(mut self, chars: &str) -> Self {
        self.chars.push_str(chars);
        self
    }

    /// Add a predefined class.
    #[must_use]
    pub fn with_class(mut self, class: CharClass) -> Self {
        self.classes.push(class);
        self
    }

    /// Whether the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty() && self.classes.is_empty()
    }

    /// Render the class body (without brackets).
    #[must_use]
    pub fn render(&self) -> String {
        let mut body = escape_class(&self.chars);
        for class in &self.classes {
            body.push_str(class.as_str());
        }
        body
    }
}

impl From<&str> for CharSet {
    fn from(s: &str) -> Self {
        Self::new().with_chars(s)
    }
}

impl From<String> for CharSet {
    fn from(s: String) -> Self {
        Self {
            chars: s,
            classes: Vec::new(),
        }
    }
}

impl From<char> for CharSet {
    fn from(c: char) -> Self {
        Self {
            chars: c.to_string(),
            classes: Vec::new(),
        }
    }
}

impl From<CharClass> for CharSet {
    fn from(class: CharClass) -> Self {
        Self::new().with_class(class)
    }
}
