//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Fincast - Forecast spending and spot unusual months
#[derive(Parser)]
#[command(name = "fincast")]
#[command(about = "Financial forecasting and anomaly detection", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Record file to analyze (.csv or .json)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Analytics config file (TOML)
    ///
    /// Defaults to ~/.local/share/fincast/config/analytics.toml when present,
    /// otherwise the built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show monthly income, expense and net totals
    Summary,

    /// Fit linear trends to monthly income, expenses and net
    Trend,

    /// Split monthly expenses into trend, seasonal and residual parts
    Decompose {
        /// Seasonal cycle length in months (defaults to config)
        #[arg(short, long)]
        period: Option<usize>,
    },

    /// Flag months with unusual income or expenses
    Anomalies {
        /// z-score cutoff (defaults to config)
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Project income and expenses forward
    Forecast {
        /// Months to project (defaults to config)
        #[arg(short, long)]
        months: Option<usize>,

        /// Number of retraining passes applied before forecasting
        #[arg(long, default_value = "0")]
        retrain: u32,
    },

    /// Show recommendations for the record set
    Recommend,

    /// Run the full analysis
    Report,

    /// Show the effective configuration
    Config,
}
