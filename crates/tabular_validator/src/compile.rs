//! Compilation of rule set definitions into engines.
//!
//! Column references by header name are resolved against the rule set's
//! declared `headers`, so a rule set using names must declare them.

use crate::rules::{
    AllowedValues, ColumnCount, DateFormat, Email, Length, NotBlank, Pattern, Range,
    RequiredTogether,
};
use crate::{ConstraintRegistry, RuleError, ValidationEngine};
use tabular_core::{
    ColumnRef, FieldRule, FieldRuleDefinition, RowRule, RowRuleDefinition, RuleSet,
};
use tracing::debug;

/// Builds a ready-to-run engine from a rule set.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tabular_core::{ColumnRef, FieldRuleDefinition, Row, RuleSetBuilder, Table};
/// use tabular_validator::build_engine;
///
/// let rules = RuleSetBuilder::new("people")
///     .headers(["id", "email"])
///     .field(ColumnRef::Name("email".into()), FieldRuleDefinition::Email)
///     .build();
///
/// let mut engine = build_engine(&rules).unwrap();
/// let data = Arc::new(Table::with_headers(["id", "email"]).with_row(Row::from_values(["1", "nope"])));
/// assert_eq!(engine.validate(&data).len(), 1);
/// ```
///
/// # Errors
///
/// Returns a [`RuleError`] if a definition is invalid or a column name
/// cannot be resolved.
pub fn build_engine(rules: &RuleSet) -> Result<ValidationEngine, RuleError> {
    build_registry(rules).map(ValidationEngine::with_registry)
}

/// Builds a registry from a rule set.
pub fn build_registry(rules: &RuleSet) -> Result<ConstraintRegistry, RuleError> {
    let headers = rules.headers.as_deref();
    let mut registry = ConstraintRegistry::new();

    if let Some(headers) = headers {
        registry.set_expected_headers(headers.iter().cloned());
    }

    for rule in &rules.rows {
        registry.add_boxed_row_constraint(build_row_rule(rule, headers)?);
    }

    for field in &rules.fields {
        let column = resolve_column(&field.column, headers)?;
        for rule in &field.rules {
            registry.add_boxed_field_constraint(column, build_field_rule(rule)?);
        }
    }

    debug!(
        "Compiled rule set '{}': {} row rules, {} field rules",
        rules.name,
        registry.row_rule_count(),
        registry.field_rule_count()
    );

    Ok(registry)
}

/// Builds one field rule from its definition.
pub fn build_field_rule(definition: &FieldRuleDefinition) -> Result<Box<dyn FieldRule>, RuleError> {
    let rule: Box<dyn FieldRule> = match definition {
        FieldRuleDefinition::NotBlank => Box::new(NotBlank),
        FieldRuleDefinition::Pattern { regex } => Box::new(Pattern::new(regex)?),
        FieldRuleDefinition::Email => Box::new(Email),
        FieldRuleDefinition::Range { min, max } => Box::new(Range::new(*min, *max)?),
        FieldRuleDefinition::Length { min, max } => Box::new(Length::new(*min, *max)?),
        FieldRuleDefinition::AllowedValues { values } => {
            Box::new(AllowedValues::new(values.iter().cloned())?)
        }
        FieldRuleDefinition::DateFormat { format } => Box::new(DateFormat::new(format.as_str())?),
    };
    Ok(rule)
}

/// Builds one row rule from its definition.
pub fn build_row_rule(
    definition: &RowRuleDefinition,
    headers: Option<&[String]>,
) -> Result<Box<dyn RowRule>, RuleError> {
    let rule: Box<dyn RowRule> = match definition {
        RowRuleDefinition::ColumnCount { expected } => Box::new(ColumnCount::new(*expected)),
        RowRuleDefinition::RequiredTogether { columns } => {
            let columns = columns
                .iter()
                .map(|column| resolve_column(column, headers))
                .collect::<Result<Vec<_>, _>>()?;
            Box::new(RequiredTogether::new(columns))
        }
    };
    Ok(rule)
}

/// Resolves a column reference to a 0-based index.
pub fn resolve_column(column: &ColumnRef, headers: Option<&[String]>) -> Result<usize, RuleError> {
    match column {
        ColumnRef::Index(index) => Ok(*index),
        ColumnRef::Name(name) => {
            let headers = headers.ok_or_else(|| RuleError::NamedColumnWithoutHeaders(name.clone()))?;
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| RuleError::UnknownColumn(name.clone()))
        }
    }
}
