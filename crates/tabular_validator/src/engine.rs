//! Main validation engine.
//!
//! This module provides the [`ValidationEngine`] that runs a single
//! validation pass over a dataset: legend check, then row rules, then field
//! rules, and caches the outcome per dataset.

use crate::{ConstraintRegistry, ViolationCollector};
use std::sync::Arc;
use std::time::Instant;
use tabular_core::{
    Dataset, FieldRule, Result, RowRule, ValidationError, ValidationReport, ValidationStats,
    Violation, display_column,
};
use tracing::{debug, info};

/// Message recorded when the header row differs from the expected legend.
pub const INVALID_LEGEND: &str = "Invalid legend.";

type SharedDataset = Arc<dyn Dataset + Send + Sync>;

/// Validation engine for tabular data.
///
/// The engine remembers the last dataset it validated. Validating the same
/// `Arc` again after a completed run returns the cached violations; any
/// other dataset resets the state and runs a full pass. The engine keeps a
/// clone of the `Arc`, so the cached dataset cannot be mutated through
/// `Arc::get_mut` while it is remembered.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tabular_core::{Row, Table};
/// use tabular_validator::ValidationEngine;
/// use tabular_validator::rules::Range;
///
/// let mut engine = ValidationEngine::new();
/// engine
///     .set_expected_headers(["id", "age"])
///     .add_field_constraint(1, Range::at_least(0.0).unwrap());
///
/// let table = Arc::new(
///     Table::with_headers(["id", "age"]).with_row(Row::from_values(["7", "-3"])),
/// );
/// engine.validate(&table);
///
/// assert_eq!(engine.is_valid(), Ok(false));
/// let violation = &engine.errors()[0];
/// assert_eq!((violation.line, violation.column), (2, Some(2)));
/// ```
#[derive(Debug, Default)]
pub struct ValidationEngine {
    registry: ConstraintRegistry,
    state: ValidationState,
}

#[derive(Default)]
struct ValidationState {
    current: Option<SharedDataset>,
    completed: bool,
    collector: ViolationCollector,
    stats: ValidationStats,
}

impl std::fmt::Debug for ValidationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationState")
            .field("has_dataset", &self.current.is_some())
            .field("completed", &self.completed)
            .field("violations", &self.collector.len())
            .finish()
    }
}

impl ValidationEngine {
    /// Creates an engine with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine applying the rules of `registry`.
    pub fn with_registry(registry: ConstraintRegistry) -> Self {
        Self {
            registry,
            state: ValidationState::default(),
        }
    }

    /// Appends a rule for `column`. See [`ConstraintRegistry::add_field_constraint`].
    ///
    /// Changing the rules drops the cached result.
    pub fn add_field_constraint<R>(&mut self, column: usize, rule: R) -> &mut Self
    where
        R: FieldRule + 'static,
    {
        self.registry_mut().add_field_constraint(column, rule);
        self
    }

    /// Appends a whole-row rule. See [`ConstraintRegistry::add_row_constraint`].
    ///
    /// Changing the rules drops the cached result.
    pub fn add_row_constraint<R>(&mut self, rule: R) -> &mut Self
    where
        R: RowRule + 'static,
    {
        self.registry_mut().add_row_constraint(rule);
        self
    }

    /// Sets the expected legend, replacing any previous expectation.
    ///
    /// Changing the rules drops the cached result.
    pub fn set_expected_headers<I, S>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registry_mut().set_expected_headers(headers);
        self
    }

    /// The registered rules.
    pub fn registry(&self) -> &ConstraintRegistry {
        &self.registry
    }

    /// Mutable access to the registered rules. Drops the cached result.
    pub fn registry_mut(&mut self) -> &mut ConstraintRegistry {
        self.invalidate();
        &mut self.registry
    }

    /// Validates a dataset, returning the violations of the run.
    ///
    /// Data problems never abort the run: a mismatched legend, a missing
    /// field or a failing rule is recorded as a [`Violation`] and validation
    /// moves on.
    pub fn validate<D>(&mut self, dataset: &Arc<D>) -> &[Violation]
    where
        D: Dataset + Send + Sync + 'static,
    {
        let dataset: SharedDataset = dataset.clone();
        let same = self
            .state
            .current
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &dataset));

        if same && self.state.completed {
            debug!("Dataset already validated, returning cached result");
            return self.errors();
        }

        self.state.collector.clear();
        self.state.completed = false;
        self.state.current = Some(Arc::clone(&dataset));

        let start = Instant::now();
        let mut evaluations = 0;

        self.check_legend(&*dataset);
        evaluations += self.check_rows(&*dataset);
        evaluations += self.check_fields(&*dataset);

        self.state.completed = true;
        self.state.stats = ValidationStats {
            rows_validated: dataset.len(),
            row_rules: self.registry.row_rule_count(),
            field_rules: self.registry.field_rule_count(),
            rule_evaluations: evaluations,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Validated {} rows: {} violations in {} ms",
            self.state.stats.rows_validated,
            self.state.collector.len(),
            self.state.stats.duration_ms
        );

        self.errors()
    }

    /// Returns true if the last completed run produced no violations.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotValidated`] if no run has completed.
    pub fn is_valid(&self) -> Result<bool> {
        if !self.state.completed {
            return Err(ValidationError::NotValidated);
        }
        Ok(self.state.collector.is_empty())
    }

    /// Violations accumulated so far, in engine order.
    pub fn errors(&self) -> &[Violation] {
        self.state.collector.violations()
    }

    /// Statistics of the last completed run.
    pub fn stats(&self) -> &ValidationStats {
        &self.state.stats
    }

    /// Builds a report of the last completed run.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotValidated`] if no run has completed.
    pub fn report(&self) -> Result<ValidationReport> {
        self.is_valid()?;
        Ok(ValidationReport::new(
            self.errors().to_vec(),
            self.state.stats.clone(),
        ))
    }

    /// Forgets the cached dataset so the next [`validate`](Self::validate)
    /// runs a full pass, even on the same dataset.
    ///
    /// Violations of the last run stay readable through
    /// [`errors`](Self::errors) until then, but [`is_valid`](Self::is_valid)
    /// fails until a new run completes.
    pub fn invalidate(&mut self) {
        self.state.current = None;
        self.state.completed = false;
    }

    /// Records a violation if the header row differs from the expected legend.
    fn check_legend(&mut self, dataset: &dyn Dataset) {
        let Some(expected) = self.registry.expected_headers() else {
            return;
        };
        if !dataset.has_headers() || expected.is_empty() {
            return;
        }

        if dataset.headers() != expected {
            debug!(
                "Legend mismatch: expected {:?}, found {:?}",
                expected,
                dataset.headers()
            );
            self.state.collector.record_legend(INVALID_LEGEND);
        }
    }

    /// Applies every row rule to every row. Returns the number of evaluations.
    fn check_rows(&mut self, dataset: &dyn Dataset) -> usize {
        let rules = self.registry.row_constraints();
        if rules.is_empty() {
            return 0;
        }

        debug!("Applying {} row rules", rules.len());
        let has_headers = dataset.has_headers();
        let mut evaluations = 0;

        for (raw_row, row) in dataset.rows().iter().enumerate() {
            for rule in rules {
                let failures = rule.evaluate(row);
                evaluations += 1;
                if !failures.is_empty() {
                    debug!("Row rule {} failed on row {}", rule.name(), raw_row);
                }
                self.state
                    .collector
                    .record_failures(raw_row, None, has_headers, failures);
            }
        }

        evaluations
    }

    /// Applies field rules column by column within each row. A row lacking a
    /// registered column gets one missing-field violation for it, and that
    /// column's rules are skipped. Returns the number of evaluations.
    fn check_fields(&mut self, dataset: &dyn Dataset) -> usize {
        if self.registry.field_rule_count() == 0 {
            return 0;
        }

        debug!(
            "Applying {} field rules on {} columns",
            self.registry.field_rule_count(),
            self.registry.columns().count()
        );
        let has_headers = dataset.has_headers();
        let mut evaluations = 0;

        for (raw_row, row) in dataset.rows().iter().enumerate() {
            for (column, rules) in self.registry.field_constraints() {
                let Some(value) = row.get(column) else {
                    self.state.collector.record_structural(
                        raw_row,
                        Some(column),
                        has_headers,
                        format!("Field \"{}\" does not exist.", display_column(column)),
                    );
                    continue;
                };

                for rule in rules {
                    let failures = rule.evaluate(value);
                    evaluations += 1;
                    self.state
                        .collector
                        .record_failures(raw_row, Some(column), has_headers, failures);
                }
            }
        }

        evaluations
    }
}

impl From<ConstraintRegistry> for ValidationEngine {
    fn from(registry: ConstraintRegistry) -> Self {
        Self::with_registry(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tabular_core::{Row, Table};

    fn always_fail(_: &str) -> Vec<String> {
        vec!["always fails".to_string()]
    }

    fn people() -> Arc<Table> {
        Arc::new(Table::with_headers(["id", "name"]).with_rows([
            Row::from_values(["1", "Ada"]),
            Row::from_values(["2", ""]),
        ]))
    }

    #[test]
    fn test_is_valid_before_validate() {
        let engine = ValidationEngine::new();
        assert_eq!(engine.is_valid(), Err(ValidationError::NotValidated));
        assert!(engine.errors().is_empty());
        assert!(engine.report().is_err());
    }

    #[test]
    fn test_no_rules_is_valid() {
        let mut engine = ValidationEngine::new();
        engine.validate(&people());
        assert_eq!(engine.is_valid(), Ok(true));
    }

    #[test]
    fn test_empty_dataset() {
        let mut engine = ValidationEngine::new();
        engine.add_field_constraint(0, always_fail);
        engine.validate(&Arc::new(Table::empty()));
        assert_eq!(engine.is_valid(), Ok(true));
    }

    #[test]
    fn test_legend_mismatch() {
        let mut engine = ValidationEngine::new();
        engine.set_expected_headers(["id", "Name"]);
        engine.validate(&people());

        assert_eq!(engine.errors(), &[Violation::new(1, None, INVALID_LEGEND)]);
    }

    #[test]
    fn test_legend_ignored_without_headers() {
        let mut engine = ValidationEngine::new();
        engine.set_expected_headers(["id", "name"]);
        engine.validate(&Arc::new(Table::from_rows(vec![Row::from_values(["x"])])));
        assert_eq!(engine.is_valid(), Ok(true));
    }

    #[test]
    fn test_empty_expected_legend_is_not_checked() {
        let mut engine = ValidationEngine::new();
        engine.set_expected_headers(Vec::<String>::new());
        engine.validate(&people());
        assert_eq!(engine.is_valid(), Ok(true));
    }

    #[test]
    fn test_legend_length_mismatch() {
        let mut engine = ValidationEngine::new();
        engine.set_expected_headers(["id", "name", "email"]);
        engine.validate(&people());
        assert_eq!(engine.errors().len(), 1);
    }

    #[test]
    fn test_missing_field_skips_rules() {
        let mut engine = ValidationEngine::new();
        engine.add_field_constraint(2, always_fail);
        engine.validate(&people());

        assert_eq!(
            engine.errors(),
            &[
                Violation::new(2, Some(3), "Field \"3\" does not exist."),
                Violation::new(3, Some(3), "Field \"3\" does not exist."),
            ]
        );
        assert_eq!(engine.stats().rule_evaluations, 0);
    }

    #[test]
    fn test_phase_ordering() {
        let mut engine = ValidationEngine::new();
        engine
            .add_field_constraint(0, always_fail)
            .add_row_constraint(|_: &Row| vec!["row".to_string()])
            .set_expected_headers(["nope"]);
        engine.validate(&people());

        let messages: Vec<_> = engine
            .errors()
            .iter()
            .map(|v| (v.line, v.column, v.message.as_str()))
            .collect();
        assert_eq!(
            messages,
            vec![
                (1, None, INVALID_LEGEND),
                (2, None, "row"),
                (3, None, "row"),
                (2, Some(1), "always fails"),
                (3, Some(1), "always fails"),
            ]
        );
    }

    #[test]
    fn test_stats() {
        let mut engine = ValidationEngine::new();
        engine
            .add_field_constraint(0, always_fail)
            .add_field_constraint(1, always_fail)
            .add_row_constraint(|_: &Row| Vec::new());
        engine.validate(&people());

        let stats = engine.stats();
        assert_eq!(stats.rows_validated, 2);
        assert_eq!(stats.row_rules, 1);
        assert_eq!(stats.field_rules, 2);
        assert_eq!(stats.rule_evaluations, 6);

        let report = engine.report().unwrap();
        assert!(!report.passed);
        assert_eq!(report.violation_count(), 4);
    }

    #[test]
    fn test_registration_drops_cache() {
        let dataset = people();
        let mut engine = ValidationEngine::new();
        engine.validate(&dataset);
        assert_eq!(engine.is_valid(), Ok(true));

        engine.add_field_constraint(0, always_fail);
        assert!(engine.is_valid().is_err());

        engine.validate(&dataset);
        assert_eq!(engine.errors().len(), 2);
    }

    #[test]
    fn test_invalidate_reruns_same_dataset() {
        let dataset = people();
        let mut engine = ValidationEngine::new();
        engine.add_field_constraint(0, always_fail);
        engine.validate(&dataset);

        engine.invalidate();
        assert_eq!(engine.errors().len(), 2);
        assert!(engine.is_valid().is_err());

        engine.validate(&dataset);
        assert_eq!(engine.errors().len(), 2);
        assert_eq!(engine.is_valid(), Ok(false));
    }

    #[test]
    fn test_cached_dataset_is_frozen() {
        let mut dataset = people();
        let mut engine = ValidationEngine::new();
        engine.validate(&dataset);

        assert!(Arc::get_mut(&mut dataset).is_none());
    }
}
