//! `survey-insights`: analyse completed survey responses from the command line.
//!
//! Usage:
//!   survey-insights templates
//!   survey-insights show customer_satisfaction --format yaml
//!   survey-insights analyze --template customer_satisfaction --responses answers.json
//!   survey-insights analyze --survey pulse.yaml --responses answers.json --export reports/

mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::analyze::AnalyzeArgs;
use commands::templates::OutputFormat;

#[derive(Parser)]
#[command(name = "survey-insights", version)]
#[command(about = "Sentiment, theme and NPS analysis for survey responses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in survey templates
    Templates,
    /// Print a built-in survey definition
    Show {
        /// Template key, e.g. customer_satisfaction
        key: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Analyse a completed response set
    Analyze(AnalyzeArgs),
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Templates => commands::templates::list(),
        Commands::Show { key, format } => commands::templates::show(&key, format),
        Commands::Analyze(args) => commands::analyze::run(&args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_requires_a_survey_source() {
        let err = Cli::try_parse_from(["survey-insights", "analyze", "--responses", "r.json"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let err = Cli::try_parse_from([
            "survey-insights",
            "analyze",
            "--template",
            "customer_satisfaction",
            "--survey",
            "s.yaml",
            "--responses",
            "r.json",
        ])
        .err()
        .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
