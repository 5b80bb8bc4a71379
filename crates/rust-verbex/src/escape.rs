//! Escaping for text placed into a pattern.
//!
//! Two regimes exist and they are not interchangeable. Literal text sits in the
//! pattern body and must have every regex metacharacter neutralised. Text placed
//! between `[` and `]` only needs the characters that are special inside a
//! bracket class; escaping with the wrong function either corrupts the class or
//! lets a character keep its special meaning.

/// Characters that are special inside a bracket class.
///
/// `&` and `~` are included because `&&` and `~~` are class set operators in the
/// `regex` dialect, and `[` opens a nested class.
pub const CLASS_METACHARACTERS: &[char] = &['\\', ']', '[', '^', '-', '&', '~'];

/// Escape text so it matches itself verbatim in the pattern body.
///
/// Every character in the engine's meta set
/// (`\ . + * ? ( ) | [ ] { } ^ $ # & - ~`) is backslash-escaped. Other
/// punctuation such as `:` or `/` is left alone since it has no special meaning.
#[must_use]
pub fn escape_literal(text: &str) -> String {
    regex::escape(text)
}

/// Escape text for use as members of a bracket class.
#[must_use]
pub fn escape_class(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if CLASS_METACHARACTERS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn literal_escapes_metacharacters() {
        assert_eq!(escape_literal("a.b"), r"a\.b");
        assert_eq!(escape_literal("(x)+"), r"\(x\)\+");
        assert_eq!(escape_literal("$^|"), r"\$\^\|");
    }

    #[test]
    fn literal_leaves_plain_punctuation() {
        assert_eq!(escape_literal("://"), "://");
        assert_eq!(escape_literal("hello world"), "hello world");
    }

    #[test]
    fn class_escapes_only_class_specials() {
        assert_eq!(escape_class("]^-"), r"\]\^\-");
        assert_eq!(escape_class("a.b"), "a.b");
        assert_eq!(escape_class("[&&~~]"), r"\[\&\&\~\~\]");
    }

    #[test]
    fn class_escape_is_valid_inside_brackets() {
        let class = format!("^[{}]$", escape_class(r"]\^-[&~"));
        let re = Regex::new(&class).unwrap();
        for c in [']', '\\', '^', '-', '[', '&', '~'] {
            assert!(re.is_match(&c.to_string()), "{c} should match");
        }
        assert!(!re.is_match("a"));
    }

    #[test]
    fn dot_is_only_escaped_outside_classes() {
        // `[.]` is already literal
        assert_eq!(escape_class("."), ".");
        assert_eq!(escape_literal("."), r"\.");
    }
}
