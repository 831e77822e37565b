//! # Tabular Rules Core
//!
//! Core data structures and traits for the tabular rules engine.
//!
//! This crate provides the building blocks shared by the validator, the
//! parser and the CLI:
//!
//! - **Dataset**: read-only access to rows and an optional header row (the legend)
//! - **Rules**: the [`FieldRule`] and [`RowRule`] capabilities the engine evaluates
//! - **Violations**: failures located by 1-based, header-aware line and column
//! - **Definitions**: serializable rule sets, as written in YAML or TOML files
//!
//! ## Example
//!
//! ```rust
//! use tabular_core::{display_column, display_line, Row, Table, Violation};
//!
//! let table = Table::with_headers(["id", "age"]).with_row(Row::from_values(["7", "-3"]));
//!
//! // The first data row sits under the legend, on line 2
//! let violation = Violation::new(display_line(0, true), Some(display_column(1)), "too young");
//! assert_eq!(violation.to_string(), "Line 2, column 2: too young");
//! # let _ = table;
//! ```

pub mod builder;
pub mod dataset;
pub mod definition;
pub mod error;
pub mod position;
pub mod rule;
pub mod violation;

pub use builder::*;
pub use dataset::*;
pub use definition::*;
pub use error::*;
pub use position::*;
pub use rule::*;
pub use violation::*;
