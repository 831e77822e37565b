//! Integration tests for compiled rule sets.
//!
//! These tests run complete rule sets, built the way a rules file would
//! declare them, against realistic datasets.

use pretty_assertions::assert_eq;
use std::sync::Arc;
use tabular_core::{
    ColumnRef, FieldRuleDefinition, Row, RowRuleDefinition, RuleSet, RuleSetBuilder, Table,
};
use tabular_validator::{RuleError, build_engine};

/// A customer export: id, email, status, signup date, country, postcode.
fn customer_rules() -> RuleSet {
    RuleSetBuilder::new("customers")
        .description("Nightly customer export")
        .headers(["id", "email", "status", "signed_up", "country", "postcode"])
        .row(RowRuleDefinition::ColumnCount { expected: 6 })
        .row(RowRuleDefinition::RequiredTogether {
            columns: vec![
                ColumnRef::Name("country".into()),
                ColumnRef::Name("postcode".into()),
            ],
        })
        .field(ColumnRef::Name("id".into()), FieldRuleDefinition::NotBlank)
        .field(
            ColumnRef::Name("id".into()),
            FieldRuleDefinition::Pattern {
                regex: r"^C\d{4}$".to_string(),
            },
        )
        .field(ColumnRef::Name("email".into()), FieldRuleDefinition::NotBlank)
        .field(ColumnRef::Name("email".into()), FieldRuleDefinition::Email)
        .field(
            ColumnRef::Name("status".into()),
            FieldRuleDefinition::AllowedValues {
                values: vec!["active".into(), "suspended".into(), "closed".into()],
            },
        )
        .field(
            ColumnRef::Name("signed_up".into()),
            FieldRuleDefinition::DateFormat {
                format: "%Y-%m-%d".to_string(),
            },
        )
        .field(
            ColumnRef::Name("country".into()),
            FieldRuleDefinition::Length {
                min: Some(2),
                max: Some(2),
            },
        )
        .build()
}

fn customers() -> Table {
    Table::with_headers(["id", "email", "status", "signed_up", "country", "postcode"]).with_rows([
        Row::from_values(["C0001", "ada@example.com", "active", "2024-01-15", "GB", "N1 9GU"]),
        Row::from_values(["C0002", "grace@example.com", "closed", "2023-11-02", "", ""]),
    ])
}

#[test]
fn test_clean_export_passes() {
    let mut engine = build_engine(&customer_rules()).expect("rules should compile");
    engine.validate(&Arc::new(customers()));

    assert_eq!(engine.is_valid(), Ok(true), "errors: {:?}", engine.errors());

    let report = engine.report().unwrap();
    assert!(report.passed);
    assert_eq!(report.stats.rows_validated, 2);
    assert_eq!(report.stats.row_rules, 2);
    assert_eq!(report.stats.field_rules, 7);
}

#[test]
fn test_broken_export_reports_every_problem_in_order() {
    let mut table = customers();
    table.add_row(Row::from_values([
        "X9",
        "not-an-email",
        "deleted",
        "2023-02-30",
        "GBR",
        "",
    ]));
    table.add_row(Row::from_values(["C0004", "", "active"]));

    let mut engine = build_engine(&customer_rules()).unwrap();
    engine.validate(&Arc::new(table));

    let found: Vec<String> = engine.errors().iter().map(ToString::to_string).collect();
    assert_eq!(
        found,
        vec![
            // Row rules, row by row
            "Line 4: Columns 5, 6 must be filled together.",
            "Line 5: This row should have 6 fields, found 3.",
            // Field rules, row by row then column by column
            "Line 4, column 1: This value is not valid.",
            "Line 4, column 2: This value is not a valid email address.",
            "Line 4, column 3: The value you selected is not a valid choice.",
            "Line 4, column 4: This value is not a valid date.",
            "Line 4, column 5: This value is too long. It should have 2 characters or less.",
            "Line 5, column 2: This value should not be blank.",
            "Line 5, column 4: Field \"4\" does not exist.",
            "Line 5, column 5: Field \"5\" does not exist.",
        ]
    );
}

#[test]
fn test_wrong_legend_is_first() {
    let table = Table::with_headers(["ID", "email", "status", "signed_up", "country", "postcode"])
        .with_row(Row::from_values(["C0001", "", "active", "2024-01-15", "", ""]));

    let mut engine = build_engine(&customer_rules()).unwrap();
    let violations = engine.validate(&Arc::new(table)).to_vec();

    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].to_string(), "Line 1: Invalid legend.");
    assert_eq!(violations[1].line, 2);
}

#[test]
fn test_unknown_column_name_is_rejected() {
    let rules = RuleSetBuilder::new("typo")
        .headers(["id"])
        .field(ColumnRef::Name("idd".into()), FieldRuleDefinition::NotBlank)
        .build();

    assert!(matches!(
        build_engine(&rules),
        Err(RuleError::UnknownColumn(name)) if name == "idd"
    ));
}

#[test]
fn test_headerless_rules_by_index() {
    let rules = RuleSetBuilder::new("raw")
        .has_headers(false)
        .field(
            ColumnRef::Index(1),
            FieldRuleDefinition::Range {
                min: Some(0.0),
                max: Some(100.0),
            },
        )
        .build();

    let table = Table::from_rows(vec![
        Row::from_values(["a", "50"]),
        Row::from_values(["b", "150"]),
    ]);

    let mut engine = build_engine(&rules).unwrap();
    engine.validate(&Arc::new(table));

    assert_eq!(
        engine.errors()[0].to_string(),
        "Line 2, column 2: This value should be between 0 and 100."
    );
}
