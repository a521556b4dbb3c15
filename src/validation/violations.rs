//! Field violations and schema construction errors.

use serde::Serialize;
use thiserror::Error;

/// The rule of a `FieldRule` that rejected a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    Required,
    Type,
    Min,
    Max,
    MinLength,
    MaxLength,
    Pattern,
    Validate,
}

impl RuleKind {
    /// Name of the rule as used in per-field message overrides.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Type => "type",
            Self::Min => "min",
            Self::Max => "max",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Pattern => "pattern",
            Self::Validate => "validate",
        }
    }
}

/// A field that failed one of its rules.
///
/// Only the first failing rule of a field is ever reported.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{field}: {message}")]
pub struct FieldViolation {
    pub field: String,
    pub rule: RuleKind,
    pub message: String,
}

/// Errors that can occur when building field rules and schemas.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Field path must not be empty")]
    EmptyPath,

    #[error("Field '{0}' is defined more than once")]
    DuplicateField(String),

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
