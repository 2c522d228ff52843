//! Error types for parsing and diffing schemas.

use crate::diff::SqlFeature;
use crate::parser::ParseError;

/// Errors that can occur while building or comparing schema descriptions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A DDL statement could not be parsed.
    #[error("Failed to parse DDL: {0}")]
    Parse(#[from] ParseError),

    /// The input is not a MySQL `CREATE TABLE` statement, or a non-MySQL
    /// dialect was requested.
    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),

    /// An ignore feature outside the recognized set.
    #[error("Unknown SQL feature '{0}', possible values are: {features}", features = SqlFeature::possible_values())]
    UnknownFeature(String),

    /// A two-sided diff entry with neither side present.
    #[error("Either `left` or `right` of {0} should be present")]
    MissingRequiredField(&'static str),

    /// Snapshot serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, Error>;
