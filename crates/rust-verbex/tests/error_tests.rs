//! Error handling tests.
//!
//! Tests for the error types, the contracts enforced by builder operations,
//! and error introspection.

use std::error::Error as _;

use rust_verbex::{CompileConfig, Flags, Matcher, PatternBuilder, VerbexError};

// =============================================================================
// Builder contracts
// =============================================================================

#[test]
fn reversed_letter_range_is_contract_violation() {
    let mut b = PatternBuilder::new();
    let err = b.letter_range('z', 'a').unwrap_err();

    assert!(err.is_contract_violation());
    assert!(!err.is_pattern_error());
    assert_eq!(err.pattern(), None);

    if let VerbexError::ContractViolation { operation, message } = err {
        assert_eq!(operation, "letter_range");
        assert!(message.contains("'z'"));
    } else {
        panic!("Expected ContractViolation variant");
    }
}

#[test]
fn reversed_number_range_is_contract_violation() {
    let mut b = PatternBuilder::new();
    let err = b.number_range(10, 2).unwrap_err();
    assert!(err.is_contract_violation());
    assert!(err.to_string().contains("number_range"));
}

#[test]
fn rejected_input_leaves_builder_unchanged() {
    let mut b = PatternBuilder::new();
    b.start_of_line(true).find("a");
    let before = b.clone();

    assert!(b.letter_range('b', 'a').is_err());
    assert!(b.number_range(2, 1).is_err());
    assert!(b.n_to_m_times("x", 3, 2).is_err());
    assert!(b.named_group("1st", "x").is_err());
    assert_eq!(b, before);
}

#[test]
fn duplicate_group_name_is_rejected() {
    let mut b = PatternBuilder::new();
    b.named_group("id", "a").unwrap();
    let err = b.named_group("id", "b").unwrap_err();
    assert!(err.is_contract_violation());
    assert!(err.to_string().contains("already used"));
}

#[test]
fn embedding_a_named_builder_twice_is_rejected() {
    let mut year = PatternBuilder::new();
    year.named_group("year", "2024").unwrap();

    let mut date = PatternBuilder::new();
    date.subpattern(&year).unwrap().find("-");
    let err = date.subpattern(&year).unwrap_err();

    assert!(err.is_contract_violation());
    assert!(err.to_string().contains("subpattern"));
    assert!(date.compile().is_ok());
}

#[test]
fn named_group_clashing_with_embedded_name_is_rejected() {
    let mut year = PatternBuilder::new();
    year.named_group("year", "2024").unwrap();

    let mut date = PatternBuilder::new();
    date.subpattern(&year).unwrap();
    let err = date.named_group("year", "x").unwrap_err();

    assert!(err.is_contract_violation());
    let m = date.compile().unwrap().find("2024").unwrap();
    assert_eq!(m.name("year"), Some("2024"));
}

#[test]
fn oversized_number_range_is_rejected() {
    let mut b = PatternBuilder::new();
    let err = b.number_range(0, u32::MAX).unwrap_err();
    assert!(err.is_contract_violation());
    assert!(err.to_string().contains("more than"));
    assert_eq!(b.render(), "");
}

#[test]
fn equal_bounds_are_allowed() {
    let mut b = PatternBuilder::new();
    assert!(b.letter_range('q', 'q').is_ok());
    assert!(b.number_range(7, 7).is_ok());
    assert!(b.n_to_m_times("x", 2, 2).is_ok());
    assert_eq!(b.render(), "[q-q](?:7)(?:x){2,2}");
}

// =============================================================================
// Compile failures
// =============================================================================

#[test]
fn syntax_error_carries_pattern_and_source() {
    let err = Matcher::new("(a", Flags::empty(), &CompileConfig::default()).unwrap_err();

    assert!(err.is_pattern_error());
    assert_eq!(err.pattern(), Some("(a"));
    assert!(err.source().is_some());

    let msg = err.to_string();
    assert!(msg.contains("Pattern: '(a'"));
}

#[test]
fn size_limit_error_is_distinct() {
    let mut b = PatternBuilder::new();
    b.n_times("abc", 1000);
    let err = b
        .compile_uncached(&CompileConfig::new().size_limit(128))
        .unwrap_err();

    assert!(err.is_pattern_error());
    assert!(matches!(err, VerbexError::CompiledTooBig { limit: 128, .. }));
    assert!(err.to_string().contains("Tip:"));
}

#[test]
fn long_patterns_are_truncated_in_messages() {
    let mut b = PatternBuilder::new();
    b.n_times("a", 10).find("x".repeat(400).as_str());
    let err = b
        .compile_uncached(&CompileConfig::new().size_limit(16))
        .unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("..."));
    assert!(msg.contains("bytes total"));
    assert_eq!(err.pattern().map(str::len), Some(b.render().len()));
}

// =============================================================================
// Construction helpers
// =============================================================================

#[test]
fn contract_helper() {
    let err = VerbexError::contract("find", "bad input");
    assert_eq!(
        err.to_string(),
        "contract violation in `find`: bad input"
    );
}

#[test]
fn config_helper() {
    let err = VerbexError::config("nest_limit must be greater than zero");
    assert!(!err.is_contract_violation());
    assert_eq!(
        err.to_string(),
        "configuration error: nest_limit must be greater than zero"
    );
}
