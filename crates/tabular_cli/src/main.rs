mod commands;
mod loader;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tabval")]
#[command(version, about = "Tabular data rules validator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a CSV file against a rule set
    Validate {
        /// Path to the rule set file (YAML or TOML)
        rules: String,

        /// Path to the CSV data file
        data: String,

        /// Field delimiter of the data file
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,

        /// Output format: text, json
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Check that a rule set parses and compiles, without reading data
    Check {
        /// Path to the rule set file (YAML or TOML)
        rules: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Validate {
            rules,
            data,
            delimiter,
            format,
        } => commands::validate::execute(&rules, &data, delimiter, &format),

        Commands::Check { rules } => commands::check::execute(&rules),
    }
}
