//! Violation collection.
//!
//! The collector turns raw (0-based) positions and failure messages into
//! [`Violation`] records located by display line and column. Identical
//! failures are not deduplicated.

use tabular_core::{Violation, display_column, display_line};

/// Accumulates violations for one validation run.
#[derive(Debug, Default)]
pub struct ViolationCollector {
    violations: Vec<Violation>,
}

impl ViolationCollector {
    /// Creates a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one violation per message returned by a rule evaluation.
    ///
    /// `raw_column` is `None` for row rules.
    pub fn record_failures<I>(
        &mut self,
        raw_row: usize,
        raw_column: Option<usize>,
        has_headers: bool,
        messages: I,
    ) where
        I: IntoIterator<Item = String>,
    {
        let line = display_line(raw_row, has_headers);
        let column = raw_column.map(display_column);
        self.violations
            .extend(messages.into_iter().map(|message| Violation::new(line, column, message)));
    }

    /// Records a violation synthesized by the engine itself, such as a
    /// missing field.
    pub fn record_structural(
        &mut self,
        raw_row: usize,
        raw_column: Option<usize>,
        has_headers: bool,
        message: impl Into<String>,
    ) {
        self.record_failures(raw_row, raw_column, has_headers, [message.into()]);
    }

    /// Records a legend violation. The legend is always line 1 and has no
    /// column.
    pub fn record_legend(&mut self, message: impl Into<String>) {
        self.violations.push(Violation::new(1, None, message));
    }

    /// Drops all recorded violations.
    pub fn clear(&mut self) {
        self.violations.clear();
    }

    /// Violations in recording order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns the number of recorded violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Consumes the collector, returning its violations.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}
