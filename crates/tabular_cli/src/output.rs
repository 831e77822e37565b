use anyhow::Result;
use colored::*;
use serde_json::json;
use tabular_core::ValidationReport;

pub fn print_validation_report(report: &ValidationReport, format: &str) -> Result<()> {
    match format {
        "json" => print_json_report(report),
        _ => {
            print_text_report(report);
            Ok(())
        }
    }
}

fn print_text_report(report: &ValidationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if !report.violations.is_empty() {
        println!("\n{}", "Violations:".red().bold());
        for (i, violation) in report.violations.iter().enumerate() {
            println!("  {}. {}", i + 1, violation.to_string().red());
        }
    }

    let stats = &report.stats;
    println!("\n{}", "Summary:".bold());
    println!("  Rows validated:   {}", stats.rows_validated);
    println!("  Row rules:        {}", stats.row_rules);
    println!("  Field rules:      {}", stats.field_rules);
    println!("  Rule evaluations: {}", stats.rule_evaluations);
    println!("  Total violations: {}", report.violation_count());
    println!("  Duration:         {} ms", stats.duration_ms);
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport) -> Result<()> {
    let output = json!({
        "passed": report.passed,
        "violations": report.violations,
        "summary": {
            "violation_count": report.violation_count(),
            "rows_validated": report.stats.rows_validated,
            "row_rules": report.stats.row_rules,
            "field_rules": report.stats.field_rules,
            "rule_evaluations": report.stats.rule_evaluations,
            "duration_ms": report.stats.duration_ms,
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
