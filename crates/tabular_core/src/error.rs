//! Error types for the tabular rules engine.
//!
//! Data-level problems (legend mismatches, missing fields, rule failures) are
//! never raised: they are recorded as [`Violation`](crate::Violation)s. The
//! errors defined here cover programmer sequencing mistakes only.

use thiserror::Error;

/// Result type for engine queries.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Usage errors surfaced by the validation engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Validity or a report was requested before any completed validation run
    #[error("No completed validation run: call validate() before querying the result")]
    NotValidated,
}
