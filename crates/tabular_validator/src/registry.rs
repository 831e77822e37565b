//! Constraint registration.
//!
//! The registry holds the declared rules: an ordered rule list per column,
//! an ordered list of whole-row rules, and an optional expected legend.
//! Nothing is checked at registration time; a column index beyond the data's
//! width is reported when the engine runs.

use tabular_core::{FieldRule, RowRule};

/// The rules bound to one column, in evaluation order.
pub type ColumnRules = Vec<Box<dyn FieldRule>>;

/// Holds the rules an engine applies.
///
/// Columns are kept in the order they were first registered, not in
/// ascending index order, and the engine walks them in that order.
///
/// # Example
///
/// ```rust
/// use tabular_validator::ConstraintRegistry;
///
/// let mut registry = ConstraintRegistry::new();
/// registry
///     .add_field_constraint(2, |v: &str| {
///         if v.is_empty() { vec!["empty".to_string()] } else { Vec::new() }
///     })
///     .set_expected_headers(["id", "name", "email"]);
///
/// assert_eq!(registry.field_rule_count(), 1);
/// assert_eq!(registry.columns().collect::<Vec<_>>(), vec![2]);
/// ```
#[derive(Default)]
pub struct ConstraintRegistry {
    fields: Vec<(usize, ColumnRules)>,
    rows: Vec<Box<dyn RowRule>>,
    expected_headers: Option<Vec<String>>,
}

impl ConstraintRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule to the list for `column`, creating the list if absent.
    pub fn add_field_constraint<R>(&mut self, column: usize, rule: R) -> &mut Self
    where
        R: FieldRule + 'static,
    {
        self.add_boxed_field_constraint(column, Box::new(rule))
    }

    /// Appends an already boxed rule to the list for `column`.
    pub fn add_boxed_field_constraint(&mut self, column: usize, rule: Box<dyn FieldRule>) -> &mut Self {
        match self.fields.iter_mut().find(|(c, _)| *c == column) {
            Some((_, rules)) => rules.push(rule),
            None => self.fields.push((column, vec![rule])),
        }
        self
    }

    /// Appends a whole-row rule.
    pub fn add_row_constraint<R>(&mut self, rule: R) -> &mut Self
    where
        R: RowRule + 'static,
    {
        self.add_boxed_row_constraint(Box::new(rule))
    }

    /// Appends an already boxed whole-row rule.
    pub fn add_boxed_row_constraint(&mut self, rule: Box<dyn RowRule>) -> &mut Self {
        self.rows.push(rule);
        self
    }

    /// Sets the expected legend, replacing any previous expectation.
    pub fn set_expected_headers<I, S>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    /// The expected legend, if one was set.
    pub fn expected_headers(&self) -> Option<&[String]> {
        self.expected_headers.as_deref()
    }

    /// Field rules grouped by column, columns in registration order.
    pub fn field_constraints(&self) -> impl Iterator<Item = (usize, &[Box<dyn FieldRule>])> {
        self.fields
            .iter()
            .map(|(column, rules)| (*column, rules.as_slice()))
    }

    /// Registered column indices in registration order.
    pub fn columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.fields.iter().map(|(column, _)| *column)
    }

    /// Row rules in registration order.
    pub fn row_constraints(&self) -> &[Box<dyn RowRule>] {
        &self.rows
    }

    /// Total number of field rules across all columns.
    pub fn field_rule_count(&self) -> usize {
        self.fields.iter().map(|(_, rules)| rules.len()).sum()
    }

    /// Number of row rules.
    pub fn row_rule_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no rule is registered. The expected legend is not a rule.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.rows.is_empty()
    }
}

impl std::fmt::Debug for ConstraintRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintRegistry")
            .field("columns", &self.columns().collect::<Vec<_>>())
            .field("field_rules", &self.field_rule_count())
            .field("row_rules", &self.row_rule_count())
            .field("expected_headers", &self.expected_headers)
            .finish()
    }
}
