//! Shared command utilities
//!
//! This module contains:
//! - `require_file` - Check that a record file was given
//! - `load_config` - Resolve the analytics config
//! - `load_series` - Load a record file and aggregate it by month
//! - `print_json` - Pretty-print a serializable result

use std::path::Path;

use anyhow::{Context, Result};
use fincast_core::{load_records, AnalyticsConfig, MonthlySeries, Record};
use serde::Serialize;
use tracing::debug;

pub fn require_file(file: Option<&Path>) -> Result<&Path> {
    file.context("No record file given (use --file <path>)")
}

pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    let config = AnalyticsConfig::load(path).context("Failed to load analytics config")?;
    debug!(?config, "Using analytics config");
    Ok(config)
}

/// Load records, reporting skipped rows on stderr
pub fn load_file(file: &Path) -> Result<Vec<Record>> {
    let report = load_records(file)
        .with_context(|| format!("Failed to load records from {}", file.display()))?;

    if report.skipped > 0 {
        eprintln!(
            "⚠️  Skipped {} malformed record(s) in {}",
            report.skipped,
            file.display()
        );
    }

    Ok(report.records)
}

pub fn load_series(file: &Path) -> Result<MonthlySeries> {
    Ok(MonthlySeries::from_records(&load_file(file)?))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
