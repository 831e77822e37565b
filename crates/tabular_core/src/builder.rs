//! Builder pattern for creating rule sets.
//!
//! This module provides an ergonomic builder for constructing a [`RuleSet`]
//! in code with a fluent API.

use crate::{ColumnRef, FieldDefinition, FieldRuleDefinition, RowRuleDefinition, RuleSet};

/// Builder for creating a `RuleSet`.
///
/// Rules added for a column that already has rules are appended to that
/// column's list, so column order is the order columns were first named.
///
/// # Example
///
/// ```rust
/// use tabular_core::{ColumnRef, FieldRuleDefinition, RuleSetBuilder};
///
/// let rules = RuleSetBuilder::new("people")
///     .description("People export")
///     .headers(["id", "email"])
///     .field(ColumnRef::Index(0), FieldRuleDefinition::NotBlank)
///     .field(ColumnRef::Name("email".into()), FieldRuleDefinition::Email)
///     .build();
///
/// assert_eq!(rules.fields.len(), 2);
/// ```
#[derive(Debug)]
pub struct RuleSetBuilder {
    name: String,
    description: Option<String>,
    has_headers: bool,
    headers: Option<Vec<String>>,
    fields: Vec<FieldDefinition>,
    rows: Vec<RowRuleDefinition>,
}

impl RuleSetBuilder {
    /// Creates a new rule set builder.
    ///
    /// Data is expected to carry a header row unless
    /// [`has_headers`](Self::has_headers) says otherwise.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            has_headers: true,
            headers: None,
            fields: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Sets the rule set description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets whether the data's first line is a header row.
    pub fn has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Sets the expected legend.
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a rule to a column.
    pub fn field(mut self, column: ColumnRef, rule: FieldRuleDefinition) -> Self {
        match self.fields.iter_mut().find(|f| f.column == column) {
            Some(field) => field.rules.push(rule),
            None => self.fields.push(FieldDefinition {
                column,
                rules: vec![rule],
            }),
        }
        self
    }

    /// Adds a whole-row rule.
    pub fn row(mut self, rule: RowRuleDefinition) -> Self {
        self.rows.push(rule);
        self
    }

    /// Builds the rule set.
    pub fn build(self) -> RuleSet {
        RuleSet {
            name: self.name,
            description: self.description,
            has_headers: self.has_headers,
            headers: self.headers,
            fields: self.fields,
            rows: self.rows,
        }
    }
}
