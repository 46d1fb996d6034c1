//! Compiled wildcard patterns.
//!
//! Compilation walks the placeholder grammar once: literal text between
//! placeholders is escaped, each placeholder is replaced by its filter's
//! fragment, and the result is anchored at both ends. The key list comes from
//! the same walk, so capture groups and keys stay in step.

use crate::error::{Result, WildcardError};
use crate::matcher::grammar::PlaceholderGrammar;
use crate::matcher::registry::FilterRegistry;
use crate::matcher::types::Params;
use regex::{Regex, RegexBuilder};

/// An anchored matcher built from a wildcard pattern.
///
/// A pattern that names an unknown filter, or whose assembled regex does not
/// compile, becomes a pattern that never matches. Use
/// [`CompiledPattern::try_compile`] to see why instead.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Original wildcard pattern
    pattern: String,

    /// Anchored regex, `None` when the pattern can never match
    regex: Option<Regex>,

    /// Output keys, one per placeholder
    names: Vec<String>,
}

impl CompiledPattern {
    /// Compile `pattern` against `registry`. Never fails.
    pub fn compile(
        pattern: &str,
        registry: &FilterRegistry,
        grammar: &PlaceholderGrammar,
        size_limit: usize,
    ) -> Self {
        match Self::try_compile(pattern, registry, grammar, size_limit) {
            Ok(compiled) => compiled,
            Err(error) => {
                tracing::debug!(pattern, %error, "pattern degraded to never-matching");
                Self::never(pattern, grammar.extract_names(pattern))
            }
        }
    }

    /// Compile `pattern`, reporting unknown filters and regex build failures.
    pub fn try_compile(
        pattern: &str,
        registry: &FilterRegistry,
        grammar: &PlaceholderGrammar,
        size_limit: usize,
    ) -> Result<Self> {
        let mut source = String::with_capacity(pattern.len() * 2 + 2);
        let mut names = Vec::new();
        let mut unnamed = 0usize;
        let mut last = 0;

        source.push('^');
        for placeholder in grammar.scan(pattern) {
            let fragment = registry
                .get(placeholder.filter)
                .ok_or_else(|| WildcardError::UnknownFilter(placeholder.filter.to_string()))?;

            source.push_str(&regex::escape(&pattern[last..placeholder.span.start]));
            source.push_str("(?:");
            source.push_str(fragment);
            source.push(')');
            last = placeholder.span.end;

            names.push(placeholder.key(&mut unnamed));
        }
        source.push_str(&regex::escape(&pattern[last..]));
        source.push('$');

        let regex = RegexBuilder::new(&source)
            .size_limit(size_limit)
            .build()
            .map_err(|e| WildcardError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex: Some(regex),
            names,
        })
    }

    /// A pattern that matches nothing.
    pub fn never(pattern: &str, names: Vec<String>) -> Self {
        Self {
            pattern: pattern.to_string(),
            regex: None,
            names,
        }
    }

    /// Match `input` in full and zip captures with keys.
    ///
    /// A group that did not participate in the match yields an empty string.
    /// When a key repeats, the last occurrence wins.
    pub fn extract(&self, input: &str) -> Option<Params> {
        let captures = self.regex.as_ref()?.captures(input)?;
        let params = captures
            .iter()
            .skip(1)
            .zip(&self.names)
            .map(|(group, name)| {
                let value = group.map(|m| m.as_str()).unwrap_or_default();
                (name.clone(), value.to_string())
            })
            .collect();
        Some(params)
    }

    pub fn is_match(&self, input: &str) -> bool {
        self.regex
            .as_ref()
            .is_some_and(|regex| regex.is_match(input))
    }

    /// True when this pattern can never match any input.
    pub fn is_never(&self) -> bool {
        self.regex.is_none()
    }

    /// The wildcard pattern this was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The assembled regex source, `None` for a never-matching pattern.
    pub fn regex_source(&self) -> Option<&str> {
        self.regex.as_ref().map(Regex::as_str)
    }

    /// Output keys in placeholder order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of capture groups, excluding the whole-match group.
    pub fn group_count(&self) -> usize {
        self.regex
            .as_ref()
            .map_or(0, |regex| regex.captures_len() - 1)
    }
}
