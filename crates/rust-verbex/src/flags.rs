//! Matching flags carried by a builder and its compiled matcher.

use regex::RegexBuilder;

bitflags::bitflags! {
    /// Out-of-band modifiers for a pattern.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u8 {
        /// Letters match both upper and lower case (`i`).
        const CASE_INSENSITIVE = 0b0000_0001;
        /// `^` and `$` match at line boundaries (`m`).
        const MULTILINE = 0b0000_0010;
        /// The input is treated as a single line: `.` also matches `\n` (`s`).
        const SINGLE_LINE = 0b0000_0100;
        /// Replace and match every occurrence instead of the first.
        const GLOBAL = 0b0000_1000;
    }
}

impl Flags {
    /// Inline flag letters understood by the engine, e.g. `"ims"`.
    ///
    /// `GLOBAL` has no inline form; it only changes how a matcher is used.
    #[must_use]
    pub fn inline_letters(self) -> String {
        let mut letters = String::new();
        if self.contains(Self::CASE_INSENSITIVE) {
            letters.push('i');
        }
        if self.contains(Self::MULTILINE) {
            letters.push('m');
        }
        if self.contains(Self::SINGLE_LINE) {
            letters.push('s');
        }
        letters
    }

    /// Wrap `pattern` in a non-capturing group that carries these flags inline.
    #[must_use]
    pub fn embed(self, pattern: &str) -> String {
        format!("(?{}:{pattern})", self.inline_letters())
    }

    /// Apply the engine-level flags to a regex builder.
    pub fn apply(self, builder: &mut RegexBuilder) {
        builder
            .case_insensitive(self.contains(Self::CASE_INSENSITIVE))
            .multi_line(self.contains(Self::MULTILINE))
            .dot_matches_new_line(self.contains(Self::SINGLE_LINE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_by_default() {
        assert!(Flags::default().is_empty());
        assert_eq!(Flags::default().inline_letters(), "");
    }

    #[test]
    fn inline_letters_skip_global() {
        let flags = Flags::CASE_INSENSITIVE | Flags::SINGLE_LINE | Flags::GLOBAL;
        assert_eq!(flags.inline_letters(), "is");
    }

    #[test]
    fn embed_without_flags_is_plain_group() {
        assert_eq!(Flags::empty().embed("ab"), "(?:ab)");
        assert_eq!(Flags::MULTILINE.embed("ab"), "(?m:ab)");
    }

    #[test]
    fn set_is_idempotent() {
        let mut flags = Flags::empty();
        flags.set(Flags::CASE_INSENSITIVE, true);
        flags.set(Flags::CASE_INSENSITIVE, true);
        assert_eq!(flags, Flags::CASE_INSENSITIVE);
        flags.set(Flags::CASE_INSENSITIVE, false);
        flags.set(Flags::CASE_INSENSITIVE, false);
        assert!(flags.is_empty());
    }

    #[test]
    fn apply_configures_builder() {
        let mut builder = RegexBuilder::new("abc");
        Flags::CASE_INSENSITIVE.apply(&mut builder);
        let re = builder.build().unwrap();
        assert!(re.is_match("ABC"));
    }
}
