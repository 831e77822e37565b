//! Parser for tabular rule set files (YAML/TOML formats).
//!
//! This module provides functionality to parse rule sets from YAML and TOML
//! files into the strongly-typed `RuleSet` structure.
//!
//! # Example
//!
//! ```rust
//! use tabular_parser::parse_yaml;
//!
//! let yaml = r#"
//! name: people
//! headers: [id, email]
//! fields:
//!   - column: email
//!     rules:
//!       - type: not_blank
//!       - type: email
//! "#;
//!
//! let rules = parse_yaml(yaml).expect("Failed to parse rule set");
//! assert_eq!(rules.name, "people");
//! assert_eq!(rules.field_rule_count(), 2);
//! ```

use std::path::Path;
use tabular_core::RuleSet;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during rule set parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported rule set file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSetFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse a rule set from a YAML string.
///
/// # Example
///
/// ```rust
/// use tabular_parser::parse_yaml;
///
/// let rules = parse_yaml("name: empty").unwrap();
/// assert!(rules.has_headers);
/// assert!(rules.fields.is_empty());
/// ```
pub fn parse_yaml(content: &str) -> Result<RuleSet> {
    let rules: RuleSet = serde_yaml_ng::from_str(content)?;
    Ok(rules)
}

/// Parse a rule set from a TOML string.
///
/// # Example
///
/// ```rust
/// use tabular_parser::parse_toml;
///
/// let toml = r#"
/// name = "scores"
/// has_headers = false
///
/// [[fields]]
/// column = 1
/// rules = [{ type = "range", min = 0, max = 100 }]
/// "#;
///
/// let rules = parse_toml(toml).unwrap();
/// assert!(!rules.has_headers);
/// assert_eq!(rules.field_rule_count(), 1);
/// ```
pub fn parse_toml(content: &str) -> Result<RuleSet> {
    let rules: RuleSet =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(rules)
}

/// Detect the rule set format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `RuleSetFormat::Yaml`
/// * `.toml` → `RuleSetFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<RuleSetFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(RuleSetFormat::Yaml),
        "toml" => Ok(RuleSetFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a rule set from a file with automatic format detection.
///
/// ```no_run
/// use tabular_parser::parse_file;
/// use std::path::Path;
///
/// let rules = parse_file(Path::new("rules/customers.yml")).unwrap();
/// println!("Loaded rule set: {}", rules.name);
/// ```
pub fn parse_file(path: &Path) -> Result<RuleSet> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    debug!("Parsing {:?} rule set from {}", format, path.display());

    match format {
        RuleSetFormat::Yaml => parse_yaml(&content),
        RuleSetFormat::Toml => parse_toml(&content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tabular_core::{ColumnRef, FieldRuleDefinition, RowRuleDefinition};

    #[test]
    fn test_parse_valid_yaml_minimal() {
        let rules = parse_yaml("name: minimal\n").expect("Failed to parse valid YAML");

        assert_eq!(rules.name, "minimal");
        assert_eq!(rules.description, None);
        assert!(rules.has_headers);
        assert!(rules.headers.is_none());
        assert!(rules.fields.is_empty());
        assert!(rules.rows.is_empty());
    }

    #[test]
    fn test_parse_yaml_full() {
        let yaml = r#"
name: customers
description: Nightly customer export
headers: [id, email, status, country, postcode]
rows:
  - type: column_count
    expected: 5
  - type: required_together
    columns: [country, 4]
fields:
  - column: id
    rules:
      - type: not_blank
      - type: pattern
        regex: ^C\d{4}$
  - column: 2
    rules:
      - type: allowed_values
        values: [active, closed]
  - column: country
    rules:
      - type: length
        min: 2
        max: 2
"#;

        let rules = parse_yaml(yaml).expect("Failed to parse YAML rule set");

        assert_eq!(rules.description.as_deref(), Some("Nightly customer export"));
        assert_eq!(rules.headers.as_ref().map(Vec::len), Some(5));
        assert_eq!(
            rules.rows,
            vec![
                RowRuleDefinition::ColumnCount { expected: 5 },
                RowRuleDefinition::RequiredTogether {
                    columns: vec![ColumnRef::Name("country".into()), ColumnRef::Index(4)],
                },
            ]
        );

        assert_eq!(rules.fields.len(), 3);
        assert_eq!(rules.fields[0].column, ColumnRef::Name("id".into()));
        assert_eq!(
            rules.fields[0].rules[1],
            FieldRuleDefinition::Pattern {
                regex: r"^C\d{4}$".to_string()
            }
        );
        assert_eq!(rules.fields[1].column, ColumnRef::Index(2));
        assert_eq!(
            rules.fields[2].rules[0],
            FieldRuleDefinition::Length {
                min: Some(2),
                max: Some(2)
            }
        );
    }

    #[test]
    fn test_parse_yaml_unknown_rule_type() {
        let yaml = r#"
name: bad
fields:
  - column: 0
    rules:
      - type: is_prime
"#;

        let result = parse_yaml(yaml);
        assert!(matches!(result, Err(ParserError::YamlError(_))));
    }

    #[test]
    fn test_parse_yaml_missing_name() {
        let result = parse_yaml("headers: [a, b]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_valid_toml() {
        let toml = r#"
name = "people"
headers = ["id", "age"]

[[rows]]
type = "column_count"
expected = 2

[[fields]]
column = "age"
rules = [
    { type = "not_blank" },
    { type = "range", min = 0, max = 150 },
]
"#;

        let rules = parse_toml(toml).expect("Failed to parse valid TOML");

        assert_eq!(rules.name, "people");
        assert_eq!(rules.rows, vec![RowRuleDefinition::ColumnCount { expected: 2 }]);
        assert_eq!(rules.fields[0].column, ColumnRef::Name("age".into()));
        assert_eq!(
            rules.fields[0].rules,
            vec![
                FieldRuleDefinition::NotBlank,
                FieldRuleDefinition::Range {
                    min: Some(0.0),
                    max: Some(150.0)
                },
            ]
        );
    }

    #[test]
    fn test_parse_invalid_toml() {
        let invalid_toml = r#"
name = "test"
[[[invalid syntax
"#;

        let result = parse_toml(invalid_toml);
        assert!(matches!(result, Err(ParserError::TomlError(_))));
    }

    #[test]
    fn test_detect_format_yaml() {
        assert_eq!(
            detect_format(Path::new("rules.yaml")).unwrap(),
            RuleSetFormat::Yaml
        );
        assert_eq!(
            detect_format(Path::new("rules.YML")).unwrap(),
            RuleSetFormat::Yaml
        );
    }

    #[test]
    fn test_detect_format_toml() {
        assert_eq!(
            detect_format(Path::new("rules.toml")).unwrap(),
            RuleSetFormat::Toml
        );
    }

    #[test]
    fn test_detect_format_unsupported() {
        let result = detect_format(Path::new("rules.json"));
        assert!(matches!(result, Err(ParserError::UnsupportedFormat(ext)) if ext == "json"));
    }

    #[test]
    fn test_detect_format_no_extension() {
        let result = detect_format(Path::new("rules"));
        assert!(matches!(result, Err(ParserError::InvalidExtension)));
    }

    #[test]
    fn test_parse_file_yaml() {
        let mut file = tempfile::Builder::new()
            .suffix(".yml")
            .tempfile()
            .expect("Failed to create temp file");
        writeln!(file, "name: from_file\nheaders: [a]").unwrap();

        let rules = parse_file(file.path()).expect("Failed to parse rule file");
        assert_eq!(rules.name, "from_file");
        assert_eq!(rules.headers, Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(ParserError::IoError(_))));
    }
}
