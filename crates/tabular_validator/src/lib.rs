//! # Tabular Rules Validator
//!
//! Validation engine for tabular data. This crate provides:
//!
//! - [`ConstraintRegistry`]: per-column field rules, whole-row rules and an expected legend
//! - [`ViolationCollector`]: turns raw positions and failure messages into located violations
//! - [`ValidationEngine`]: runs the legend check, row rules and field rules, in that order
//! - [`rules`]: a built-in rule vocabulary
//! - [`build_engine`]: compiles a declarative [`RuleSet`](tabular_core::RuleSet)
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tabular_core::{Row, Table};
//! use tabular_validator::ValidationEngine;
//! use tabular_validator::rules::{Email, NotBlank};
//!
//! let mut engine = ValidationEngine::new();
//! engine
//!     .set_expected_headers(["id", "email"])
//!     .add_field_constraint(0, NotBlank)
//!     .add_field_constraint(1, Email);
//!
//! let data = Arc::new(
//!     Table::with_headers(["id", "email"])
//!         .with_row(Row::from_values(["1", "ada@example.com"]))
//!         .with_row(Row::from_values(["", "bob@example.com"])),
//! );
//!
//! for violation in engine.validate(&data) {
//!     println!("{violation}");
//! }
//! assert_eq!(engine.is_valid(), Ok(false));
//! ```

mod collector;
mod compile;
mod engine;
mod error;
mod registry;
pub mod rules;

pub use collector::*;
pub use compile::*;
pub use engine::*;
pub use error::*;
pub use registry::*;
