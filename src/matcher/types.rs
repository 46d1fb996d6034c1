//! Shared type definitions for wildcard matching.

use std::collections::HashMap;

/// Extracted parameters: output key to captured text.
///
/// Named placeholders use their prop name as key; unnamed ones use their
/// decimal position among the unnamed placeholders (`"0"`, `"1"`, ...).
pub type Params = HashMap<String, String>;
