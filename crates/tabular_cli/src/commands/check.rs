use anyhow::{Context, Result};
use tabular_parser::parse_file;
use tabular_validator::build_registry;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(rules_path: &str) -> Result<()> {
    info!("Checking rule set: {}", rules_path);

    let rules = parse_file(Path::new(rules_path))
        .with_context(|| format!("Failed to parse rule set file: {}", rules_path))?;

    // Compiling resolves column names and checks every pattern and bound
    let registry = build_registry(&rules)
        .with_context(|| format!("Invalid rule set: {}", rules.name))?;

    output::print_success("Rule set is valid");

    println!("\nRule Set Summary:");
    println!("  Name:        {}", rules.name);
    println!(
        "  Description: {}",
        rules.description.as_deref().unwrap_or("N/A")
    );
    println!("  Has headers: {}", rules.has_headers);
    if let Some(headers) = registry.expected_headers() {
        println!("  Legend:      {}", headers.join(", "));
    }

    if !registry.row_constraints().is_empty() {
        let names: Vec<&str> = registry.row_constraints().iter().map(|r| r.name()).collect();
        println!("  Row rules:   {}", names.join(", "));
    }

    if registry.field_rule_count() > 0 {
        println!("\nField Rules:");
        for (column, column_rules) in registry.field_constraints() {
            let names: Vec<&str> = column_rules.iter().map(|r| r.name()).collect();
            let label = rules
                .headers
                .as_ref()
                .and_then(|headers| headers.get(column))
                .map(|name| format!("{} ({})", column + 1, name))
                .unwrap_or_else(|| (column + 1).to_string());
            println!("  Column {}: {}", label, names.join(", "));
        }
    }

    Ok(())
}
