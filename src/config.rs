//! Configuration for wildcard matching.
//!
//! Controls the resource bounds applied to every call (input length,
//! identifier length, regex size), the compiled-pattern cache, batch
//! parallelism, and any extra filters to register on construction.
//!
//! Configuration can be built in code or loaded from YAML or JSON:
//!
//! ```rust
//! use wildcard_param::MatchConfig;
//!
//! let config = MatchConfig::from_yaml_str(
//!     r#"
//! max_input_len: 1024
//! cache:
//!   max_size: 64
//! filters:
//!   hex2: "([0-9A-Fa-f]{2})"
//! "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.max_input_len, 1024);
//! assert_eq!(config.cache.max_size, 64);
//! assert_eq!(config.max_identifier_len, 64);
//! ```

use crate::error::{Result, WildcardError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Default maximum input length in bytes (64 KiB).
pub const DEFAULT_MAX_INPUT_LEN: usize = 64 * 1024;

/// Default maximum length of a filter name or prop name.
pub const DEFAULT_MAX_IDENTIFIER_LEN: usize = 64;

/// Default compiled regex size limit, matching the `regex` crate default.
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Compiled-pattern cache configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether compiled patterns are cached at all
    pub enabled: bool,

    /// Maximum number of patterns to keep
    pub max_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_size: 256,
        }
    }
}

/// Matcher configuration.
///
/// # Examples
///
/// ```rust
/// use wildcard_param::MatchConfig;
///
/// let config = MatchConfig::new()
///     .with_max_input_len(4096)
///     .with_cache_size(32)
///     .with_filter("hex2", "([0-9A-Fa-f]{2})");
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Inputs longer than this many bytes never match.
    ///
    /// Some built-in filters use unbounded repetition, so this bounds the
    /// work done per call.
    ///
    /// **Default**: 65536
    pub max_input_len: usize,

    /// Maximum length of a filter name or prop name inside a placeholder.
    ///
    /// A bracketed token whose identifiers exceed this bound is not a
    /// placeholder and is matched as literal text.
    ///
    /// **Default**: 64
    pub max_identifier_len: usize,

    /// Size limit handed to the regex compiler for each pattern.
    pub regex_size_limit: usize,

    /// Minimum batch size before `test_batch` fans out on the rayon pool.
    pub parallel_threshold: usize,

    /// Compiled-pattern cache settings
    pub cache: CacheConfig,

    /// Extra filters registered (validated) when a matcher is built
    pub filters: HashMap<String, String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            max_identifier_len: DEFAULT_MAX_IDENTIFIER_LEN,
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
            parallel_threshold: 64,
            cache: CacheConfig::default(),
            filters: HashMap::new(),
        }
    }
}

impl MatchConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tight bounds for matching untrusted input from the network.
    pub fn strict() -> Self {
        Self {
            max_input_len: 4 * 1024,
            max_identifier_len: 32,
            regex_size_limit: 1 << 20,
            cache: CacheConfig {
                enabled: true,
                max_size: 64,
            },
            ..Default::default()
        }
    }

    /// Loose bounds for trusted, offline processing of large inputs.
    pub fn permissive() -> Self {
        Self {
            max_input_len: 16 * 1024 * 1024,
            max_identifier_len: 255,
            regex_size_limit: 64 * (1 << 20),
            parallel_threshold: 16,
            cache: CacheConfig {
                enabled: true,
                max_size: 4096,
            },
            ..Default::default()
        }
    }

    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }

    pub fn with_max_identifier_len(mut self, max_identifier_len: usize) -> Self {
        self.max_identifier_len = max_identifier_len;
        self
    }

    pub fn with_regex_size_limit(mut self, regex_size_limit: usize) -> Self {
        self.regex_size_limit = regex_size_limit;
        self
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Set the cache size. A size of zero disables caching.
    pub fn with_cache_size(mut self, max_size: usize) -> Self {
        self.cache.max_size = max_size;
        self.cache.enabled = max_size > 0;
        self
    }

    pub fn with_filter(mut self, name: &str, fragment: &str) -> Self {
        self.filters.insert(name.to_string(), fragment.to_string());
        self
    }

    /// Check that the bounds are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_identifier_len == 0 {
            return Err(WildcardError::InvalidConfig(
                "max_identifier_len must be at least 1".to_string(),
            ));
        }
        // Keeps the placeholder grammar regex small.
        if self.max_identifier_len > 1000 {
            return Err(WildcardError::InvalidConfig(format!(
                "max_identifier_len {} exceeds 1000",
                self.max_identifier_len
            )));
        }
        if self.regex_size_limit == 0 {
            return Err(WildcardError::InvalidConfig(
                "regex_size_limit must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a configuration from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file. `.json` files are parsed as JSON, anything
    /// else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_yaml_str(&contents),
        }
    }
}
