//! Fincast CLI - Financial forecasting and anomaly detection
//!
//! Usage:
//!   fincast -f records.csv summary          Monthly totals
//!   fincast -f records.csv anomalies        Flag unusual months
//!   fincast -f records.csv forecast -m 6    Project six months ahead
//!   fincast -f records.csv report --json    Full analysis as JSON

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let file = || commands::require_file(cli.file.as_deref());
    let config = || commands::load_config(cli.config.as_deref());

    match cli.command {
        Commands::Summary => commands::cmd_summary(file()?, cli.json),
        Commands::Trend => commands::cmd_trend(file()?, cli.json),
        Commands::Decompose { period } => {
            commands::cmd_decompose(file()?, &config()?, period, cli.json)
        }
        Commands::Anomalies { threshold } => {
            commands::cmd_anomalies(file()?, &config()?, threshold, cli.json)
        }
        Commands::Forecast { months, retrain } => {
            commands::cmd_forecast(file()?, &config()?, months, retrain, cli.json)
        }
        Commands::Recommend => commands::cmd_recommend(file()?, &config()?, cli.json),
        Commands::Report => commands::cmd_report(file()?, &config()?, cli.json),
        Commands::Config => commands::cmd_config(cli.config.as_deref(), cli.json),
    }
}
