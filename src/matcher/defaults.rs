//! Built-in filters.
//!
//! Every built-in fragment is a single capture group. Most are one-or-more
//! repetitions of a POSIX-style ASCII class; `print` and `all` are lazy
//! zero-or-more so they give way to whatever literal text follows them.

use std::collections::HashMap;

/// Built-in `(name, fragment)` pairs.
pub const BUILTIN_FILTERS: &[(&str, &str)] = &[
    ("digit", "([0-9]+)"),
    ("alnum", "([0-9A-Za-z]+)"),
    ("alpha", "([A-Za-z]+)"),
    ("xdigit", "([0-9A-Fa-f]+)"),
    ("upper", "([A-Z]+)"),
    ("lower", "([a-z]+)"),
    ("word", "([A-Za-z0-9_]+)"),
    ("space", "([[:space:]]+)"),
    ("blank", "([[:blank:]]+)"),
    ("graph", "([[:graph:]]+)"),
    ("ascii", r"([\x00-\x7F]+)"),
    ("cntrl", "([[:cntrl:]]+)"),
    ("print", "([[:print:]]*?)"),
    ("punct", "([[:punct:]]+)"),
    // Any character, newlines included.
    ("all", "((?s:.)*?)"),
];

/// Insert every built-in filter, overwriting same-named entries.
pub fn register_defaults(filters: &mut HashMap<String, String>) {
    for (name, fragment) in BUILTIN_FILTERS {
        filters.insert((*name).to_string(), (*fragment).to_string());
    }
}
