//! Input validation for builder operations with value-level contracts.
//!
//! Every check runs before the builder is mutated, so a rejected call leaves
//! the builder exactly as it was.

use crate::error::{Result, VerbexError};

/// Check that `start..=end` is a non-empty range.
pub fn validate_range<T>(operation: &'static str, start: T, end: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Debug,
{
    if start > end {
        return Err(VerbexError::contract(
            operation,
            format!("start {start:?} is after end {end:?}"),
        ));
    }
    Ok(())
}

/// Check that `name` is usable as a capture group name.
///
/// Names follow identifier rules: an ASCII letter or underscore, then ASCII
/// letters, digits or underscores.
pub fn validate_group_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(VerbexError::contract("named_group", "group name is empty"));
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(VerbexError::contract(
            "named_group",
            format!("group name {name:?} must start with a letter or underscore"),
        ));
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(VerbexError::contract(
            "named_group",
            format!("group name {name:?} contains invalid character {bad:?}"),
        ));
    }
    Ok(())
}
