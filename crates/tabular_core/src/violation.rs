//! Violation records and validation reports.
//!
//! A [`Violation`] is one failure at a display position. A
//! [`ValidationReport`] bundles the violations of a completed run with
//! execution statistics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One reported validation failure.
///
/// Positions are display positions: 1-based, and header-aware for lines.
/// `column` is `None` for legend and row-level violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Display line (1-based)
    pub line: usize,

    /// Display column (1-based), absent for legend and row violations
    pub column: Option<usize>,

    /// Failure message
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(line: usize, column: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(column) => write!(f, "Line {}, column {}: {}", self.line, column, self.message),
            None => write!(f, "Line {}: {}", self.line, self.message),
        }
    }
}

/// Report of a completed validation run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Whether the run produced no violations
    pub passed: bool,

    /// Violations in engine order
    pub violations: Vec<Violation>,

    /// Execution statistics
    pub stats: ValidationStats,
}

/// Statistics about a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationStats {
    /// Number of data rows read
    pub rows_validated: usize,

    /// Number of registered row rules
    pub row_rules: usize,

    /// Number of registered field rules, across all columns
    pub field_rules: usize,

    /// Number of times a rule was evaluated
    pub rule_evaluations: usize,

    /// Validation duration in milliseconds
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Creates a report from the violations of a run.
    pub fn new(violations: Vec<Violation>, stats: ValidationStats) -> Self {
        Self {
            passed: violations.is_empty(),
            violations,
            stats,
        }
    }

    /// Returns the number of violations.
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }
}
