//! Rule traits.
//!
//! A rule is a capability with a single operation: evaluate a value and
//! return the list of failure messages, empty when the value passes. The
//! engine knows nothing about what a rule checks. Concrete rules live in
//! `tabular_validator::rules`, and any closure with the right signature is a
//! rule too.

use crate::Row;

/// A rule bound to one column and applied to every row's value in it.
///
/// # Example
///
/// ```rust
/// use tabular_core::FieldRule;
///
/// struct NonNegative;
///
/// impl FieldRule for NonNegative {
///     fn evaluate(&self, value: &str) -> Vec<String> {
///         match value.parse::<f64>() {
///             Ok(n) if n >= 0.0 => Vec::new(),
///             _ => vec![format!("\"{value}\" must be a number >= 0")],
///         }
///     }
/// }
///
/// assert!(NonNegative.evaluate("3").is_empty());
/// assert_eq!(NonNegative.evaluate("-3").len(), 1);
/// ```
pub trait FieldRule: Send + Sync {
    /// Evaluates a field value, returning one message per failure.
    fn evaluate(&self, value: &str) -> Vec<String>;

    /// A short name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A rule applied to an entire row as a unit.
pub trait RowRule: Send + Sync {
    /// Evaluates a row, returning one message per failure.
    fn evaluate(&self, row: &Row) -> Vec<String>;

    /// A short name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> FieldRule for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn evaluate(&self, value: &str) -> Vec<String> {
        self(value)
    }

    fn name(&self) -> &str {
        "closure"
    }
}

impl<F> RowRule for F
where
    F: Fn(&Row) -> Vec<String> + Send + Sync,
{
    fn evaluate(&self, row: &Row) -> Vec<String> {
        self(row)
    }

    fn name(&self) -> &str {
        "closure"
    }
}
