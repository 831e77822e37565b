//! Built-in rules.
//!
//! Field rules:
//! - [`NotBlank`]: value must contain a non-whitespace character
//! - [`Pattern`]: value must match a regex
//! - [`Email`]: value must be an email address
//! - [`Range`]: value must be a number within bounds
//! - [`Length`]: value length in characters must be within bounds
//! - [`AllowedValues`]: value must be one of a predefined set
//! - [`DateFormat`]: value must be a date in a strftime format
//!
//! Row rules:
//! - [`ColumnCount`]: row must carry an exact number of fields
//! - [`RequiredTogether`]: if one listed column is filled, all must be
//!
//! Every field rule except [`NotBlank`] accepts an empty value, so that
//! optional columns only need `NotBlank` when they are in fact required.

use crate::RuleError;
use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use regex::Regex;
use std::fmt::Write;
use tabular_core::{FieldRule, Row, RowRule, display_column};
use validator::ValidateEmail;

fn failure(message: impl Into<String>) -> Vec<String> {
    vec![message.into()]
}

/// Value must contain a non-whitespace character.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotBlank;

impl FieldRule for NotBlank {
    fn evaluate(&self, value: &str) -> Vec<String> {
        if value.trim().is_empty() {
            return failure("This value should not be blank.");
        }
        Vec::new()
    }

    fn name(&self) -> &str {
        "not_blank"
    }
}

/// Value must match a regex pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compiles the pattern.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidRegex`] if the pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self, RuleError> {
        let regex = Regex::new(pattern).map_err(|e| RuleError::InvalidRegex {
            pattern: pattern.to_string(),
            error: e.to_string(),
        })?;
        Ok(Self { regex })
    }

    /// The source pattern.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl FieldRule for Pattern {
    fn evaluate(&self, value: &str) -> Vec<String> {
        if value.is_empty() || self.regex.is_match(value) {
            return Vec::new();
        }
        failure("This value is not valid.")
    }

    fn name(&self) -> &str {
        "pattern"
    }
}

/// Value must be an email address.
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl FieldRule for Email {
    fn evaluate(&self, value: &str) -> Vec<String> {
        if value.is_empty() || value.validate_email() {
            return Vec::new();
        }
        failure("This value is not a valid email address.")
    }

    fn name(&self) -> &str {
        "email"
    }
}

/// Value must parse as a number within the bounds (inclusive).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    min: Option<f64>,
    max: Option<f64>,
}

impl Range {
    /// Creates a range with optional bounds.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidBounds`] if no bound is given, a bound is
    /// not finite, or `min > max`.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Result<Self, RuleError> {
        if min.is_none() && max.is_none() {
            return Err(RuleError::bounds("range", "at least one of min or max is required"));
        }
        if min.into_iter().chain(max).any(|bound| !bound.is_finite()) {
            return Err(RuleError::bounds("range", "bounds must be finite numbers"));
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(RuleError::bounds("range", format!("min {min} is greater than max {max}")));
            }
        }
        Ok(Self { min, max })
    }

    /// Creates a range with both bounds.
    pub fn between(min: f64, max: f64) -> Result<Self, RuleError> {
        Self::new(Some(min), Some(max))
    }

    /// Creates a range with only a lower bound.
    pub fn at_least(min: f64) -> Result<Self, RuleError> {
        Self::new(Some(min), None)
    }

    /// Creates a range with only an upper bound.
    pub fn at_most(max: f64) -> Result<Self, RuleError> {
        Self::new(None, Some(max))
    }
}

impl FieldRule for Range {
    fn evaluate(&self, value: &str) -> Vec<String> {
        if value.is_empty() {
            return Vec::new();
        }
        let Ok(number) = value.trim().parse::<f64>() else {
            return failure("This value should be a valid number.");
        };
        if !number.is_finite() {
            return failure("This value should be a valid number.");
        }

        match (self.min, self.max) {
            (Some(min), Some(max)) if number < min || number > max => {
                failure(format!("This value should be between {min} and {max}."))
            }
            (Some(min), None) if number < min => {
                failure(format!("This value should be {min} or more."))
            }
            (None, Some(max)) if number > max => {
                failure(format!("This value should be {max} or less."))
            }
            _ => Vec::new(),
        }
    }

    fn name(&self) -> &str {
        "range"
    }
}

/// Value length in characters must be within the bounds (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Length {
    min: Option<usize>,
    max: Option<usize>,
}

impl Length {
    /// Creates a length rule with optional bounds.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidBounds`] if no bound is given or
    /// `min > max`.
    pub fn new(min: Option<usize>, max: Option<usize>) -> Result<Self, RuleError> {
        match (min, max) {
            (None, None) => Err(RuleError::bounds(
                "length",
                "at least one of min or max is required",
            )),
            (Some(min), Some(max)) if min > max => Err(RuleError::bounds(
                "length",
                format!("min {min} is greater than max {max}"),
            )),
            _ => Ok(Self { min, max }),
        }
    }
}

impl FieldRule for Length {
    fn evaluate(&self, value: &str) -> Vec<String> {
        if value.is_empty() {
            return Vec::new();
        }

        let length = value.chars().count();
        let mut failures = Vec::new();
        if let Some(min) = self.min.filter(|min| length < *min) {
            failures.push(format!(
                "This value is too short. It should have {min} characters or more."
            ));
        }
        if let Some(max) = self.max.filter(|max| length > *max) {
            failures.push(format!(
                "This value is too long. It should have {max} characters or less."
            ));
        }
        failures
    }

    fn name(&self) -> &str {
        "length"
    }
}

/// Value must be one of a predefined set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedValues {
    values: Vec<String>,
}

impl AllowedValues {
    /// Creates the rule from the allowed values.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::EmptyAllowedValues`] if `values` is empty.
    pub fn new<I, S>(values: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(RuleError::EmptyAllowedValues);
        }
        Ok(Self { values })
    }
}

impl FieldRule for AllowedValues {
    fn evaluate(&self, value: &str) -> Vec<String> {
        if value.is_empty() || self.values.iter().any(|allowed| allowed == value) {
            return Vec::new();
        }
        failure("The value you selected is not a valid choice.")
    }

    fn name(&self) -> &str {
        "allowed_values"
    }
}

/// Value must be a date in a strftime format, e.g. `%Y-%m-%d`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    format: String,
}

impl DateFormat {
    /// Creates the rule from a strftime format.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidDateFormat`] if the format has an unknown
    /// specifier or does not pin down a full calendar date.
    pub fn new(format: impl Into<String>) -> Result<Self, RuleError> {
        let format = format.into();
        let invalid = |reason: &str| RuleError::InvalidDateFormat {
            format: format.clone(),
            reason: reason.to_string(),
        };

        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(invalid("unknown or malformed specifier"));
        }

        // A usable format must read back the date it writes.
        let sample = NaiveDate::default();
        let mut rendered = String::new();
        if write!(rendered, "{}", sample.format(&format)).is_err()
            || NaiveDate::parse_from_str(&rendered, &format).ok() != Some(sample)
        {
            return Err(invalid("does not describe a complete date"));
        }

        Ok(Self { format })
    }

    /// The strftime format.
    pub fn as_str(&self) -> &str {
        &self.format
    }
}

impl FieldRule for DateFormat {
    fn evaluate(&self, value: &str) -> Vec<String> {
        if value.is_empty() || NaiveDate::parse_from_str(value, &self.format).is_ok() {
            return Vec::new();
        }
        failure("This value is not a valid date.")
    }

    fn name(&self) -> &str {
        "date_format"
    }
}

/// Row must carry exactly `expected` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnCount {
    expected: usize,
}

impl ColumnCount {
    /// Creates the rule.
    pub fn new(expected: usize) -> Self {
        Self { expected }
    }
}

impl RowRule for ColumnCount {
    fn evaluate(&self, row: &Row) -> Vec<String> {
        if row.len() == self.expected {
            return Vec::new();
        }
        failure(format!(
            "This row should have {} fields, found {}.",
            self.expected,
            row.len()
        ))
    }

    fn name(&self) -> &str {
        "column_count"
    }
}

/// If any listed column holds a non-blank value, all of them must.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredTogether {
    columns: Vec<usize>,
}

impl RequiredTogether {
    /// Creates the rule from 0-based column indices.
    pub fn new(columns: impl IntoIterator<Item = usize>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }
}

impl RowRule for RequiredTogether {
    fn evaluate(&self, row: &Row) -> Vec<String> {
        let filled = |column: &usize| row.get(*column).is_some_and(|v| !v.trim().is_empty());
        let any = self.columns.iter().any(filled);
        let all = self.columns.iter().all(filled);
        if !any || all {
            return Vec::new();
        }

        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| display_column(*c).to_string())
            .collect();
        failure(format!(
            "Columns {} must be filled together.",
            columns.join(", ")
        ))
    }

    fn name(&self) -> &str {
        "required_together"
    }
}
