//! Registry of named filters.

use crate::error::{Result, WildcardError};
use crate::matcher::grammar::PlaceholderGrammar;
use regex::Regex;
use std::collections::HashMap;

/// Mapping from filter name to the regex fragment it substitutes.
///
/// A fresh registry is seeded with the built-in filters. Registration is an
/// upsert; there is no removal.
///
/// # Example
/// ```rust
/// use wildcard_param::FilterRegistry;
///
/// let mut registry = FilterRegistry::new();
/// registry.register("hex2", "([0-9A-Fa-f]{2})");
///
/// assert!(registry.contains("hex2"));
/// assert!(registry.contains("digit"));
/// assert_eq!(registry.get("hex2"), Some("([0-9A-Fa-f]{2})"));
/// ```
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    filters: HashMap<String, String>,
}

impl FilterRegistry {
    /// Create a registry holding the built-in filters.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        crate::matcher::defaults::register_defaults(&mut registry.filters);
        registry
    }

    /// Create a registry without any filters.
    pub fn empty() -> Self {
        Self {
            filters: HashMap::new(),
        }
    }

    /// Insert or overwrite a filter without validating the fragment.
    ///
    /// A malformed fragment makes every pattern that uses it never match.
    pub fn register(&mut self, name: &str, fragment: &str) -> &mut Self {
        self.filters.insert(name.to_string(), fragment.to_string());
        self
    }

    /// Insert or overwrite a filter after validating it.
    ///
    /// The name must be usable inside a placeholder under `grammar`, and the
    /// fragment must compile to a regex with exactly one capture group.
    pub fn try_register(
        &mut self,
        grammar: &PlaceholderGrammar,
        name: &str,
        fragment: &str,
    ) -> Result<&mut Self> {
        if !grammar.is_identifier(name) {
            return Err(WildcardError::InvalidFilterName(name.to_string()));
        }

        let regex = Regex::new(fragment).map_err(|e| WildcardError::InvalidFragment {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        let groups = regex.captures_len() - 1;
        if groups != 1 {
            return Err(WildcardError::InvalidFragment {
                name: name.to_string(),
                reason: format!("expected exactly one capture group, found {groups}"),
            });
        }

        Ok(self.register(name, fragment))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Registered filter names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.filters.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
