//! Declarative rule set definitions.
//!
//! These types describe a rule set as data, the way it is written in YAML or
//! TOML files. They carry no behavior: `tabular_validator::build_engine`
//! compiles a [`RuleSet`] into a ready-to-run engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A complete set of rules for one kind of tabular file.
///
/// # Example
///
/// ```rust
/// use tabular_core::{ColumnRef, FieldDefinition, FieldRuleDefinition, RuleSet};
///
/// let rules = RuleSet {
///     name: "people".to_string(),
///     description: None,
///     has_headers: true,
///     headers: Some(vec!["id".to_string(), "age".to_string()]),
///     fields: vec![FieldDefinition {
///         column: ColumnRef::Name("age".to_string()),
///         rules: vec![FieldRuleDefinition::Range { min: Some(0.0), max: None }],
///     }],
///     rows: vec![],
/// };
/// assert_eq!(rules.field_rule_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Name identifying this rule set
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Whether the data's first line is a header row
    #[serde(default = "default_has_headers")]
    pub has_headers: bool,

    /// Expected legend, compared in order against the data's header row
    #[serde(default)]
    pub headers: Option<Vec<String>>,

    /// Per-column rules, in evaluation order
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,

    /// Whole-row rules, in evaluation order
    #[serde(default)]
    pub rows: Vec<RowRuleDefinition>,
}

fn default_has_headers() -> bool {
    true
}

impl RuleSet {
    /// Returns the number of field rules across all columns.
    pub fn field_rule_count(&self) -> usize {
        self.fields.iter().map(|f| f.rules.len()).sum()
    }
}

/// Rules attached to one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// The column, by 0-based index or header name
    pub column: ColumnRef,

    /// Rules applied to the column, in evaluation order
    pub rules: Vec<FieldRuleDefinition>,
}

/// Reference to a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    /// 0-based column index
    Index(usize),
    /// Header name, resolved against the rule set's `headers`
    Name(String),
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Index(index) => write!(f, "#{index}"),
            ColumnRef::Name(name) => write!(f, "\"{name}\""),
        }
    }
}

/// Field rule vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldRuleDefinition {
    /// Value must contain a non-whitespace character
    NotBlank,

    /// Value must match the regex pattern
    Pattern {
        /// Regular expression pattern
        regex: String,
    },

    /// Value must be an email address
    Email,

    /// Value must be a number within the bounds (inclusive)
    Range {
        /// Minimum value
        #[serde(default)]
        min: Option<f64>,
        /// Maximum value
        #[serde(default)]
        max: Option<f64>,
    },

    /// Value length in characters must be within the bounds (inclusive)
    Length {
        /// Minimum length
        #[serde(default)]
        min: Option<usize>,
        /// Maximum length
        #[serde(default)]
        max: Option<usize>,
    },

    /// Value must be one of the listed values
    AllowedValues {
        /// List of valid values
        values: Vec<String>,
    },

    /// Value must be a date in the given strftime format
    DateFormat {
        /// Format string (e.g., "%Y-%m-%d")
        format: String,
    },
}

/// Row rule vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RowRuleDefinition {
    /// Row must carry exactly this many fields
    ColumnCount {
        /// Expected number of fields
        expected: usize,
    },

    /// If any listed column is filled, all of them must be
    RequiredTogether {
        /// Columns that go together
        columns: Vec<ColumnRef>,
    },
}
