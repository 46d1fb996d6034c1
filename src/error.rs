//! Error types for the wildcard-param crate.
//!
//! The total API (`test`, `compile`, `extract_names`) never returns these;
//! they surface only from the strict `try_*` operations and configuration
//! loading.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WildcardError>;

#[derive(Debug, Error)]
pub enum WildcardError {
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[error("Invalid filter name: {0}")]
    InvalidFilterName(String),

    #[error("Invalid fragment for filter '{name}': {reason}")]
    InvalidFragment { name: String, reason: String },

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Input too long: {len} bytes exceeds limit of {limit}")]
    InputTooLong { len: usize, limit: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
