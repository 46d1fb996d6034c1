//! Primary wildcard matching interface.
//!
//! [`WildcardMatcher`] owns a filter registry, a compiled-pattern cache and a
//! [`MatchConfig`]. It is `Send + Sync`; registration and matching may happen
//! from any thread. A process-wide instance backs the free functions in the
//! crate root.

use crate::config::MatchConfig;
use crate::error::{Result, WildcardError};
use crate::matcher::{
    CacheStats, CompiledPattern, FilterRegistry, Params, PatternCache, PlaceholderGrammar,
};
use rayon::prelude::*;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Wildcard pattern matcher.
///
/// # Usage Patterns
///
/// ## Single Input
/// ```rust
/// use wildcard_param::WildcardMatcher;
///
/// let matcher = WildcardMatcher::new();
/// let params = matcher.test("2024-05", "[digit:year]-[digit:month]").unwrap();
/// assert_eq!(params["year"], "2024");
/// assert_eq!(params["month"], "05");
///
/// assert!(matcher.test("May 2024", "[digit:year]-[digit:month]").is_none());
/// ```
///
/// ## Custom Filters
/// ```rust
/// use wildcard_param::WildcardMatcher;
///
/// let matcher = WildcardMatcher::new();
/// matcher.register_filter("hex2", "([0-9A-Fa-f]{2})");
///
/// let params = matcher.test("#ff8800", "#[hex2:r][hex2:g][hex2:b]").unwrap();
/// assert_eq!(params["g"], "88");
/// ```
///
/// ## Batch Processing
/// ```rust
/// use wildcard_param::WildcardMatcher;
///
/// let matcher = WildcardMatcher::new();
/// let results = matcher.test_batch(&["a=1", "b=2", "oops"], "[lower:key]=[digit:value]");
/// assert_eq!(results.iter().filter(|r| r.is_some()).count(), 2);
/// ```
#[derive(Debug)]
pub struct WildcardMatcher {
    registry: RwLock<FilterRegistry>,
    cache: PatternCache,
    grammar: PlaceholderGrammar,
    config: MatchConfig,
}

impl WildcardMatcher {
    /// Create a matcher with the built-in filters and default configuration.
    pub fn new() -> Self {
        Self::build(FilterRegistry::new(), MatchConfig::default())
    }

    /// Create a matcher with custom configuration.
    ///
    /// Filters listed in the configuration are registered with validation.
    pub fn with_config(config: MatchConfig) -> Result<Self> {
        Self::with_registry(FilterRegistry::new(), config)
    }

    /// Create a matcher around an existing registry.
    pub fn with_registry(registry: FilterRegistry, config: MatchConfig) -> Result<Self> {
        config.validate()?;
        let matcher = Self::build(registry, config);

        let mut extra: Vec<_> = matcher.config.filters.iter().collect();
        extra.sort();
        {
            let mut registry = matcher.write_registry();
            for (name, fragment) in extra {
                registry.try_register(&matcher.grammar, name, fragment)?;
            }
        }

        Ok(matcher)
    }

    fn build(registry: FilterRegistry, config: MatchConfig) -> Self {
        Self {
            registry: RwLock::new(registry),
            cache: PatternCache::new(config.cache.clone()),
            grammar: PlaceholderGrammar::new(config.max_identifier_len),
            config,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Match `input` against `pattern` and extract its parameters.
    ///
    /// Returns `None` when the input does not match, exceeds the configured
    /// length, or the pattern names an unknown or malformed filter.
    pub fn test(&self, input: &str, pattern: &str) -> Option<Params> {
        if input.len() > self.config.max_input_len {
            tracing::debug!(
                len = input.len(),
                limit = self.config.max_input_len,
                "input exceeds length limit"
            );
            return None;
        }
        self.compile(pattern).extract(input)
    }

    /// Like [`test`](Self::test), but reports why a pattern cannot match.
    ///
    /// A well-formed pattern that simply does not match yields `Ok(None)`.
    pub fn try_test(&self, input: &str, pattern: &str) -> Result<Option<Params>> {
        if input.len() > self.config.max_input_len {
            return Err(WildcardError::InputTooLong {
                len: input.len(),
                limit: self.config.max_input_len,
            });
        }
        Ok(self.try_compile(pattern)?.extract(input))
    }

    /// Check whether `input` matches `pattern` without extracting values.
    pub fn is_match(&self, input: &str, pattern: &str) -> bool {
        input.len() <= self.config.max_input_len && self.compile(pattern).is_match(input)
    }

    /// Match many inputs against one pattern.
    ///
    /// The pattern is compiled once. Batches of at least
    /// `parallel_threshold` inputs are processed on the rayon pool; results
    /// keep input order.
    pub fn test_batch<S>(&self, inputs: &[S], pattern: &str) -> Vec<Option<Params>>
    where
        S: AsRef<str> + Sync,
    {
        let compiled = self.compile(pattern);
        let limit = self.config.max_input_len;
        let run = |input: &S| {
            let input = input.as_ref();
            if input.len() > limit {
                None
            } else {
                compiled.extract(input)
            }
        };

        if inputs.len() >= self.config.parallel_threshold {
            inputs.par_iter().map(run).collect()
        } else {
            inputs.iter().map(run).collect()
        }
    }

    /// Compile `pattern` into an anchored matcher, using the cache.
    ///
    /// Never fails: an unusable pattern compiles to one that never matches.
    pub fn compile(&self, pattern: &str) -> Arc<CompiledPattern> {
        // Held across lookup and insert so a concurrent registration cannot
        // interleave with a stale insert.
        let registry = self.read_registry();
        if let Some(compiled) = self.cache.get(pattern) {
            return compiled;
        }

        let compiled = Arc::new(CompiledPattern::compile(
            pattern,
            &registry,
            &self.grammar,
            self.config.regex_size_limit,
        ));
        self.cache.insert(compiled.clone());
        compiled
    }

    /// Compile `pattern`, reporting unknown filters and malformed fragments.
    ///
    /// Successful compilations are cached and shared with
    /// [`compile`](Self::compile).
    pub fn try_compile(&self, pattern: &str) -> Result<Arc<CompiledPattern>> {
        let registry = self.read_registry();
        if let Some(compiled) = self.cache.get(pattern) {
            if !compiled.is_never() {
                return Ok(compiled);
            }
        }

        let compiled = Arc::new(CompiledPattern::try_compile(
            pattern,
            &registry,
            &self.grammar,
            self.config.regex_size_limit,
        )?);
        self.cache.insert(compiled.clone());
        Ok(compiled)
    }

    /// Output keys for `pattern`, in placeholder order.
    pub fn extract_names(&self, pattern: &str) -> Vec<String> {
        self.grammar.extract_names(pattern)
    }

    /// Insert or overwrite a filter without validation.
    pub fn register_filter(&self, name: &str, fragment: &str) {
        let mut registry = self.write_registry();
        registry.register(name, fragment);
        self.cache.invalidate();
        tracing::debug!(name, fragment, "registered filter");
    }

    /// Insert or overwrite a filter after validating its name and fragment.
    pub fn try_register_filter(&self, name: &str, fragment: &str) -> Result<()> {
        let mut registry = self.write_registry();
        registry.try_register(&self.grammar, name, fragment)?;
        self.cache.invalidate();
        tracing::debug!(name, fragment, "registered filter");
        Ok(())
    }

    pub fn has_filter(&self, name: &str) -> bool {
        self.read_registry().contains(name)
    }

    /// The fragment registered under `name`.
    pub fn filter(&self, name: &str) -> Option<String> {
        self.read_registry().get(name).map(str::to_string)
    }

    /// Registered filter names, sorted.
    pub fn filter_names(&self) -> Vec<String> {
        self.read_registry().names()
    }

    /// A copy of the current registry.
    pub fn registry_snapshot(&self) -> FilterRegistry {
        self.read_registry().clone()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn read_registry(&self) -> RwLockReadGuard<'_, FilterRegistry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_registry(&self) -> RwLockWriteGuard<'_, FilterRegistry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for WildcardMatcher {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_MATCHER: OnceLock<WildcardMatcher> = OnceLock::new();

/// Get the process-wide matcher used by the crate-level functions.
pub fn global_matcher() -> &'static WildcardMatcher {
    GLOBAL_MATCHER.get_or_init(WildcardMatcher::new)
}

/// Configure the process-wide matcher.
///
/// Must run before the first use of any crate-level function. Returns
/// `Ok(false)` if the global matcher was already initialized, in which case
/// `config` is ignored.
pub fn init_global_matcher(config: MatchConfig) -> Result<bool> {
    let matcher = WildcardMatcher::with_config(config)?;
    Ok(GLOBAL_MATCHER.set(matcher).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matcher_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WildcardMatcher>();
        assert_send_sync::<Arc<CompiledPattern>>();
    }

    #[test]
    fn test_matcher_creation() {
        let matcher = WildcardMatcher::new();
        assert!(matcher.has_filter("digit"));
        assert!(matcher.has_filter("all"));
        assert!(!matcher.has_filter("nonexistent"));
    }

    #[test]
    fn test_with_config_registers_filters() {
        let config = MatchConfig::new().with_filter("hex2", "([0-9A-Fa-f]{2})");
        let matcher = WildcardMatcher::with_config(config).unwrap();

        assert!(matcher.has_filter("hex2"));
        assert_eq!(matcher.test("ff", "[hex2:]").unwrap()["0"], "ff");
    }

    #[test]
    fn test_with_config_rejects_bad_filter() {
        let config = MatchConfig::new().with_filter("broken", "([unclosed");
        let result = WildcardMatcher::with_config(config);
        assert!(matches!(
            result,
            Err(WildcardError::InvalidFragment { .. })
        ));
    }

    #[test]
    fn test_with_empty_registry() {
        let matcher =
            WildcardMatcher::with_registry(FilterRegistry::empty(), MatchConfig::default())
                .unwrap();
        assert!(matcher.filter_names().is_empty());
        assert!(matcher.test("1", "[digit:]").is_none());
        assert_eq!(matcher.test("x", "x").unwrap().len(), 0);
    }

    #[test]
    fn test_input_length_guard() {
        let matcher = WildcardMatcher::with_config(MatchConfig::new().with_max_input_len(4))
            .unwrap();
        assert!(matcher.test("abcd", "[lower:]").is_some());
        assert!(matcher.test("abcde", "[lower:]").is_none());
        assert!(!matcher.is_match("abcde", "[lower:]"));
        assert!(matches!(
            matcher.try_test("abcde", "[lower:]"),
            Err(WildcardError::InputTooLong { len: 5, limit: 4 })
        ));
    }

    #[test]
    fn test_try_test_distinguishes_failures() {
        let matcher = WildcardMatcher::new();
        assert!(matcher.try_test("abc", "[digit:]").unwrap().is_none());
        assert!(matches!(
            matcher.try_test("abc", "[nope:]"),
            Err(WildcardError::UnknownFilter(_))
        ));
        assert_eq!(matcher.try_test("42", "[digit:n]").unwrap().unwrap()["n"], "42");
    }

    #[test]
    fn test_try_compile_after_never_cached() {
        let matcher = WildcardMatcher::new();
        assert!(matcher.compile("[nope:]").is_never());
        assert!(matcher.try_compile("[nope:]").is_err());
    }

    #[test]
    fn test_compile_uses_cache() {
        let matcher = WildcardMatcher::new();
        let first = matcher.compile("[digit:a]");
        let second = matcher.compile("[digit:a]");

        assert!(Arc::ptr_eq(&first, &second));
        let stats = matcher.cache_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_registration_invalidates_cache() {
        let matcher = WildcardMatcher::new();
        assert!(matcher.compile("[late:]").is_never());

        matcher.register_filter("late", "(z+)");
        let compiled = matcher.compile("[late:]");
        assert!(!compiled.is_never());
        assert_eq!(matcher.test("zzz", "[late:]").unwrap()["0"], "zzz");
        assert_eq!(matcher.cache_stats().invalidations, 1);
    }

    #[test]
    fn test_overwrite_builtin() {
        let matcher = WildcardMatcher::new();
        assert!(matcher.test("9", "[digit:]").is_some());

        matcher.register_filter("digit", "([0-7]+)");
        assert!(matcher.test("9", "[digit:]").is_none());
        assert_eq!(matcher.filter("digit").unwrap(), "([0-7]+)");
    }

    #[test]
    fn test_cache_disabled() {
        let matcher =
            WildcardMatcher::with_config(MatchConfig::new().with_cache_size(0)).unwrap();
        let first = matcher.compile("[digit:]");
        let second = matcher.compile("[digit:]");
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(matcher.cache_stats().total_lookups, 0);
    }

    #[test]
    fn test_batch_sequential_and_parallel() {
        let inputs: Vec<String> = (0..100).map(|i| format!("item-{i}")).collect();

        let sequential = WildcardMatcher::with_config(
            MatchConfig::new().with_parallel_threshold(usize::MAX),
        )
        .unwrap();
        let parallel =
            WildcardMatcher::with_config(MatchConfig::new().with_parallel_threshold(1)).unwrap();

        let a = sequential.test_batch(&inputs, "[lower:kind]-[digit:n]");
        let b = parallel.test_batch(&inputs, "[lower:kind]-[digit:n]");

        assert_eq!(a, b);
        assert_eq!(a.len(), 100);
        assert_eq!(a[42].as_ref().unwrap()["n"], "42");
    }

    #[test]
    fn test_registry_snapshot_is_detached() {
        let matcher = WildcardMatcher::new();
        let snapshot = matcher.registry_snapshot();
        matcher.register_filter("later", "(x)");

        assert!(!snapshot.contains("later"));
        assert!(matcher.has_filter("later"));
    }
}
