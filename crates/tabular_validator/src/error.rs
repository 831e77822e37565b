//! Error types for building rules.

use thiserror::Error;

/// Errors that can occur while turning definitions into rules.
///
/// These are configuration problems found before any data is read. Data
/// problems are never errors: they become violations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuleError {
    /// Invalid regex pattern
    #[error("Invalid regex pattern '{pattern}': {error}")]
    InvalidRegex { pattern: String, error: String },

    /// Lower bound above upper bound, or no bound at all
    #[error("Invalid bounds for {rule} rule: {message}")]
    InvalidBounds { rule: &'static str, message: String },

    /// Date format with a bad specifier, or one that cannot yield a full date
    #[error("Invalid date format '{format}': {reason}")]
    InvalidDateFormat { format: String, reason: String },

    /// Allowed values list is empty
    #[error("Allowed values rule requires at least one value")]
    EmptyAllowedValues,

    /// Column referenced by header name, but no such header is declared
    #[error("Unknown column '{0}': not found in declared headers")]
    UnknownColumn(String),

    /// Column referenced by header name in a rule set without headers
    #[error("Column '{0}' is referenced by name but the rule set declares no headers")]
    NamedColumnWithoutHeaders(String),
}

impl RuleError {
    /// Creates a new invalid bounds error.
    pub fn bounds(rule: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidBounds {
            rule,
            message: message.into(),
        }
    }
}
