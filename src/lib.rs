//! # wildcard-param
//!
//! Match strings against human-readable wildcard patterns and extract named
//! parameters.
//!
//! A pattern is literal text with placeholders of the form
//! `[filter:name]`. The filter selects what the placeholder matches (`digit`,
//! `alpha`, `all`, ...), and the optional name becomes the key of the
//! extracted value. Unnamed placeholders (`[filter:]`) are keyed by their
//! position among the unnamed placeholders: `"0"`, `"1"`, and so on.
//!
//! Everything outside placeholders is matched literally, and the whole input
//! must match.
//!
//! ## Quick Start
//!
//! ```rust
//! let params = wildcard_param::test("2024-05", "[digit:year]-[digit:month]").unwrap();
//! assert_eq!(params["year"], "2024");
//! assert_eq!(params["month"], "05");
//!
//! let params = wildcard_param::test("1-2-3", "[digit:]-[digit:]-[digit:]").unwrap();
//! assert_eq!(params["2"], "3");
//!
//! // Literal text is never interpreted as regex syntax.
//! assert!(wildcard_param::test("axb", "a.b").is_none());
//! ```
//!
//! ### Custom Filters
//!
//! ```rust
//! wildcard_param::register_filter("hex2", "([0-9A-Fa-f]{2})");
//!
//! let params = wildcard_param::test("ff", "[hex2:]").unwrap();
//! assert_eq!(params["0"], "ff");
//! ```
//!
//! ### Isolated Matchers
//!
//! The crate-level functions share one process-wide [`WildcardMatcher`].
//! Construct your own to keep a separate registry and configuration:
//!
//! ```rust
//! use wildcard_param::{MatchConfig, WildcardMatcher};
//!
//! let matcher = WildcardMatcher::with_config(MatchConfig::strict()).unwrap();
//! assert!(matcher.test(&"a".repeat(10_000), "[lower:]").is_none());
//! ```
//!
//! ## Failure Semantics
//!
//! [`test`] never fails. Inputs that do not match, inputs longer than the
//! configured limit, unknown filters, and malformed filter fragments all
//! produce `None`. Use [`try_test`] to tell these cases apart.

pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;

use std::sync::Arc;

pub use config::{CacheConfig, MatchConfig};
pub use engine::{global_matcher, init_global_matcher, WildcardMatcher};
pub use error::{Result, WildcardError};
pub use matcher::{
    CacheStats, CompiledPattern, FilterRegistry, Params, Placeholder, PlaceholderGrammar,
    BUILTIN_FILTERS,
};

/// Match `input` against `pattern` using the global matcher.
///
/// Returns the extracted parameters, or `None` when the input does not match.
pub fn test(input: &str, pattern: &str) -> Option<Params> {
    global_matcher().test(input, pattern)
}

/// Like [`test`], but reports unknown filters, malformed fragments and
/// oversized input as errors.
pub fn try_test(input: &str, pattern: &str) -> Result<Option<Params>> {
    global_matcher().try_test(input, pattern)
}

/// Compile `pattern` against the global registry.
pub fn compile_pattern(pattern: &str) -> Arc<CompiledPattern> {
    global_matcher().compile(pattern)
}

/// Output keys for `pattern`, in placeholder order.
pub fn extract_names(pattern: &str) -> Vec<String> {
    global_matcher().extract_names(pattern)
}

/// Insert or overwrite a filter in the global registry.
pub fn register_filter(name: &str, fragment: &str) {
    global_matcher().register_filter(name, fragment)
}

/// Insert or overwrite a filter in the global registry after validating it.
pub fn try_register_filter(name: &str, fragment: &str) -> Result<()> {
    global_matcher().try_register_filter(name, fragment)
}

pub fn has_filter(name: &str) -> bool {
    global_matcher().has_filter(name)
}

/// Filter names in the global registry, sorted.
pub fn filter_names() -> Vec<String> {
    global_matcher().filter_names()
}
