use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tabular_parser::parse_file;
use tabular_validator::build_engine;
use tracing::info;

use crate::{loader, output};

pub fn execute(rules_path: &str, data_path: &str, delimiter: char, format: &str) -> Result<()> {
    info!("Validating {} against {}", data_path, rules_path);

    // Parse and compile the rule set
    let rules = parse_file(Path::new(rules_path))
        .with_context(|| format!("Failed to parse rule set file: {}", rules_path))?;
    let mut engine = build_engine(&rules)
        .with_context(|| format!("Invalid rule set: {}", rules.name))?;

    if format != "json" {
        output::print_info(&format!(
            "Rule set loaded: {} ({} field rules, {} row rules)",
            rules.name,
            engine.registry().field_rule_count(),
            engine.registry().row_rule_count()
        ));
    }

    // Load the data
    let delimiter = loader::delimiter_byte(delimiter)?;
    let table = loader::load_csv(Path::new(data_path), rules.has_headers, delimiter)?;
    let dataset = Arc::new(table);

    engine.validate(&dataset);
    let report = engine.report()?;

    output::print_validation_report(&report, format)?;

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}
