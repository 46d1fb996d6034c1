//! Placeholder grammar shared by the pattern compiler and the name extractor.
//!
//! A placeholder is `[` + filter name + `:` + optional prop name + `]`, where
//! both identifiers are ASCII word characters bounded in length. The compiler
//! and the name extractor both walk [`PlaceholderGrammar::scan`], so the
//! capture groups of a compiled pattern and its key list always line up.

use std::ops::Range;

/// A single `[filter:prop]` occurrence inside a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'p> {
    /// Filter name, looked up in the registry
    pub filter: &'p str,

    /// Explicit prop name, `None` for `[filter:]`
    pub prop: Option<&'p str>,

    /// Byte range of the whole token in the pattern
    pub span: Range<usize>,
}

impl Placeholder<'_> {
    /// Output key for this placeholder.
    ///
    /// `unnamed` counts the unnamed placeholders seen so far and is advanced
    /// when this one has no prop name.
    pub fn key(&self, unnamed: &mut usize) -> String {
        match self.prop {
            Some(prop) => prop.to_string(),
            None => {
                let key = unnamed.to_string();
                *unnamed += 1;
                key
            }
        }
    }
}

/// Placeholder scanner for a given identifier bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderGrammar {
    max_identifier_len: usize,
}

impl PlaceholderGrammar {
    /// Build the scanner for identifiers of at most `max_identifier_len`
    /// bytes. A bound of zero is raised to one.
    pub fn new(max_identifier_len: usize) -> Self {
        Self {
            max_identifier_len: max_identifier_len.max(1),
        }
    }

    pub fn max_identifier_len(&self) -> usize {
        self.max_identifier_len
    }

    /// Check whether `name` could appear as a filter name in a placeholder.
    pub fn is_identifier(&self, name: &str) -> bool {
        !name.is_empty()
            && name.len() <= self.max_identifier_len
            && name.bytes().all(is_word_byte)
    }

    /// Iterate placeholders left to right.
    pub fn scan<'p>(&self, pattern: &'p str) -> Placeholders<'p> {
        Placeholders {
            pattern,
            pos: 0,
            max_identifier_len: self.max_identifier_len,
        }
    }

    /// Try to read a placeholder whose `[` sits at byte `start`.
    fn parse_at(pattern: &str, start: usize, max: usize) -> Option<Placeholder<'_>> {
        let bytes = pattern.as_bytes();
        let filter_start = start + 1;
        let filter_end = word_end(bytes, filter_start, max);
        if filter_end == filter_start || bytes.get(filter_end) != Some(&b':') {
            return None;
        }

        let prop_start = filter_end + 1;
        let prop_end = word_end(bytes, prop_start, max);
        if bytes.get(prop_end) != Some(&b']') {
            return None;
        }

        let prop = &pattern[prop_start..prop_end];
        Some(Placeholder {
            filter: &pattern[filter_start..filter_end],
            prop: (!prop.is_empty()).then_some(prop),
            span: start..prop_end + 1,
        })
    }

    /// Output keys for `pattern`, in placeholder order.
    ///
    /// Named placeholders yield their prop name. Unnamed ones yield a
    /// zero-based counter that advances once per unnamed placeholder.
    pub fn extract_names(&self, pattern: &str) -> Vec<String> {
        let mut unnamed = 0usize;
        self.scan(pattern)
            .map(|placeholder| placeholder.key(&mut unnamed))
            .collect()
    }
}

/// Iterator over the placeholders of one pattern.
#[derive(Debug, Clone)]
pub struct Placeholders<'p> {
    pattern: &'p str,
    pos: usize,
    max_identifier_len: usize,
}

impl<'p> Iterator for Placeholders<'p> {
    type Item = Placeholder<'p>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(offset) = self.pattern[self.pos..].find('[') {
            let start = self.pos + offset;
            match PlaceholderGrammar::parse_at(self.pattern, start, self.max_identifier_len) {
                Some(placeholder) => {
                    self.pos = placeholder.span.end;
                    return Some(placeholder);
                }
                None => self.pos = start + 1,
            }
        }
        self.pos = self.pattern.len();
        None
    }
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// End of a run of at most `max` word bytes starting at `start`.
///
/// A run longer than `max` is cut at `max`, which leaves a word byte where
/// the caller expects a delimiter.
fn word_end(bytes: &[u8], start: usize, max: usize) -> usize {
    bytes
        .get(start..)
        .unwrap_or_default()
        .iter()
        .take(max)
        .take_while(|&&b| is_word_byte(b))
        .count()
        + start
}
