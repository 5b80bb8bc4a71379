//! Convenient re-exports for common rust-verbex usage.
//!
//! # Example
//!
//! ```
//! use rust_verbex::prelude::*;
//!
//! let mut digits = PatternBuilder::new();
//! digits.start_of_line(true).one_or_more(CharClass::Digit).end_of_line(true);
//! assert!(digits.compile().unwrap().test("2024"));
//! ```

// Builder and inputs
pub use crate::builder::PatternBuilder;
pub use crate::term::{CharClass, CharSet, SpecialChar, Term};

// Compiled output
pub use crate::flags::Flags;
pub use crate::matcher::{Matcher, PatternMatch};

// Error handling
pub use crate::error::{Result, VerbexError};

// Configuration
pub use crate::cache::RegexCache;
pub use crate::config::CompileConfig;
