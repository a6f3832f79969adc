//! Error types for tree operations.

use thiserror::Error;

/// Errors reported by tree operations.
///
/// Variants that describe a shape mismatch carry the offending node rendered
/// as a string, so the error stays independent of the tree backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpsError {
    #[error("Not a number: {0}")]
    NotANumber(String),

    /// A string primitive in compressed mode that failed integer parsing.
    #[error("Not a number: {reason} {input}")]
    UnparsableNumber { input: String, reason: String },

    #[error("Not a string: {0}")]
    NotAString(String),

    #[error("Not a list: {0}")]
    NotAList(String),

    #[error("Not a map: {0}")]
    NotAMap(String),

    #[error("key is not a string: {0}")]
    KeyNotString(String),

    /// Bulk map merge dropped one or more entries.
    #[error("some keys are not strings: [{}]", .0.join(", "))]
    KeysNotStrings(Vec<String>),

    #[error("Could not merge {first} and {second}")]
    CannotMerge { first: String, second: String },

    #[error("Invalid identifier '{input}': {message}")]
    InvalidIdentifier { input: String, message: String },

    #[error("Unknown registry entry: {0}")]
    UnknownEntry(String),

    #[error("Serde error: {0}")]
    Serde(String),
}

impl From<serde_json::Error> for OpsError {
    fn from(e: serde_json::Error) -> Self {
        OpsError::Serde(e.to_string())
    }
}

/// Convenience alias used throughout treeops-core.
pub type Result<T> = std::result::Result<T, OpsError>;
