//! Wildcard pattern compilation and parameter extraction.
//!
//! ## Architecture
//!
//! A pattern goes through three stages:
//! - **Scan**: [`PlaceholderGrammar`] finds `[filter:prop]` tokens left to right
//! - **Compile**: [`CompiledPattern`] escapes literal text, substitutes filter
//!   fragments from the [`FilterRegistry`], and anchors the result
//! - **Extract**: captures are zipped with the keys from the same scan
//!
//! [`PatternCache`] keeps compiled patterns around between calls.
//!
//! ## Example Usage
//!
//! ```rust
//! use wildcard_param::matcher::{CompiledPattern, FilterRegistry, PlaceholderGrammar};
//!
//! let grammar = PlaceholderGrammar::new(64);
//! let registry = FilterRegistry::new();
//! let compiled = CompiledPattern::compile("[digit:year]-[digit:month]", &registry, &grammar, 1 << 20);
//!
//! let params = compiled.extract("2024-05").unwrap();
//! assert_eq!(params["year"], "2024");
//! assert_eq!(params["month"], "05");
//! ```

pub mod cache;
pub mod compiled;
pub mod defaults;
pub mod grammar;
pub mod registry;
pub mod types;

pub use cache::{CacheStats, PatternCache};
pub use compiled::CompiledPattern;
pub use defaults::{register_defaults, BUILTIN_FILTERS};
pub use grammar::{Placeholder, PlaceholderGrammar, Placeholders};
pub use registry::FilterRegistry;
pub use types::Params;
