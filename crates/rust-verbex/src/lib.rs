//! rust-verbex: readable regular expressions
//!
//! This crate builds regular expressions from chained, descriptive method calls
//! ("start of line", "find X", "maybe Y", "anything but Z") and compiles them
//! with the [`regex`] crate.
//!
//! # Features
//!
//! - **Always well formed**: every operation appends a balanced fragment, and
//!   literal text is escaped for the context it lands in (pattern body or
//!   bracket class)
//! - **Idempotent anchors and flags**: toggling twice never duplicates anything
//! - **Quantifiers bind to the last fragment** via tracked offsets, never by
//!   re-parsing the pattern
//! - **Compiled pattern cache** shared across builders
//!
//! # Example
//!
//! ```
//! use rust_verbex::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut bird = PatternBuilder::new();
//!     bird.find("bird");
//!
//!     let matcher = bird.compile()?;
//!     assert_eq!(
//!         matcher.replace("Replace bird with a duck", "duck"),
//!         "Replace duck with a duck"
//!     );
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod cache;
pub mod config;
pub mod error;
pub mod escape;
pub mod flags;
pub mod matcher;
pub mod prelude;
pub mod term;
pub mod validation;

pub use builder::PatternBuilder;
pub use cache::{CacheStats, GLOBAL_CACHE, RegexCache};
pub use config::CompileConfig;
pub use config::env::EnvConfig;
pub use error::{Result, VerbexError};
pub use escape::{escape_class, escape_literal};
pub use flags::Flags;
pub use matcher::{Matcher, PatternMatch};
pub use term::{CharClass, CharSet, SpecialChar, Term};
