//! Report command implementations

use std::path::Path;

use anyhow::{bail, Result};
use fincast_core::analytics::{decompose, detect_anomalies, fit, TrendResult};
use fincast_core::{AnalysisEngine, AnalyticsConfig, ForecastingSession};
use serde::Serialize;

use super::{load_file, load_series, money, print_json};

pub fn cmd_summary(file: &Path, json: bool) -> Result<()> {
    let series = load_series(file)?;
    let buckets = series.buckets();

    if json {
        return print_json(&buckets);
    }

    println!();
    println!("📊 Monthly Summary");
    println!("   ─────────────────────────────────────────────────────────────");

    if buckets.is_empty() {
        println!("   No records found.");
        return Ok(());
    }

    println!(
        "   {:8} │ {:>12} │ {:>12} │ {:>12}",
        "Month", "Income", "Expenses", "Net"
    );
    println!("   ─────────┼──────────────┼──────────────┼─────────────");
    for bucket in &buckets {
        println!(
            "   {:8} │ {:>12} │ {:>12} │ {:>12}",
            bucket.period.to_string(),
            money(bucket.income),
            money(bucket.expenses),
            money(bucket.net())
        );
    }

    let income: f64 = series.income.iter().sum();
    let expenses: f64 = series.expenses.iter().sum();
    println!("   ─────────┼──────────────┼──────────────┼─────────────");
    println!(
        "   {:8} │ {:>12} │ {:>12} │ {:>12}",
        "Total",
        money(income),
        money(expenses),
        money(income - expenses)
    );

    Ok(())
}

#[derive(Serialize)]
struct TrendOutput {
    months: usize,
    income: Option<TrendResult>,
    expenses: Option<TrendResult>,
    net: Option<TrendResult>,
}

pub fn cmd_trend(file: &Path, json: bool) -> Result<()> {
    let series = load_series(file)?;
    let output = TrendOutput {
        months: series.len(),
        income: fit(&series.income),
        expenses: fit(&series.expenses),
        net: fit(&series.net),
    };

    if json {
        return print_json(&output);
    }

    println!();
    println!("📈 Trends ({} months)", output.months);
    println!("   ─────────────────────────────────────────────────────────────");

    if output.months < 2 {
        println!("   Need at least 2 months of data to fit a trend.");
        return Ok(());
    }

    for (name, trend) in [
        ("Income", output.income),
        ("Expenses", output.expenses),
        ("Net", output.net),
    ] {
        if let Some(trend) = trend {
            let r2 = trend
                .r2
                .map(|r2| format!("{:.3}", r2))
                .unwrap_or_else(|| "n/a".to_string());
            println!(
                "   {:9} {:>8} {:>10}/month   R² {}",
                name,
                trend.direction().as_str(),
                money(trend.slope),
                r2
            );
        }
    }

    Ok(())
}

pub fn cmd_decompose(
    file: &Path,
    config: &AnalyticsConfig,
    period: Option<usize>,
    json: bool,
) -> Result<()> {
    let period = period.unwrap_or(config.decomposition.period);
    if period == 0 {
        bail!("Seasonal period must be at least 1");
    }

    let series = load_series(file)?;
    let result = decompose(&series.expenses, period);

    if json {
        return print_json(&result);
    }

    println!();
    println!("🌀 Seasonal Decomposition of Expenses (period {})", period);
    println!("   ─────────────────────────────────────────────────────────────");

    if series.is_empty() {
        println!("   No records found.");
        return Ok(());
    }

    if series.len() < period {
        println!(
            "   ⚠️  Only {} months of data; the seasonal pattern needs a full {}-month cycle.",
            series.len(),
            period
        );
    }

    println!(
        "   {:8} │ {:>10} │ {:>10} │ {:>10} │ {:>10}",
        "Month", "Actual", "Trend", "Seasonal", "Residual"
    );
    println!("   ─────────┼────────────┼────────────┼────────────┼───────────");
    for (i, month) in series.periods.iter().enumerate() {
        println!(
            "   {:8} │ {:>10.2} │ {:>10.2} │ {:>10.2} │ {:>10.2}",
            month.to_string(),
            series.expenses[i],
            result.trend[i],
            result.seasonal[i],
            result.residual[i]
        );
    }

    println!();
    println!("   Seasonal pattern:");
    for (phase, deviation) in result.seasonal_pattern.iter().enumerate() {
        if let Some(month) = series.phase_period(phase) {
            println!("     {:3} {:>+10.2}", month.month_name(), deviation);
        }
    }

    Ok(())
}

pub fn cmd_anomalies(
    file: &Path,
    config: &AnalyticsConfig,
    threshold: Option<f64>,
    json: bool,
) -> Result<()> {
    let threshold = threshold.unwrap_or(config.anomaly.threshold);
    if !threshold.is_finite() || threshold < 0.0 {
        bail!("Threshold must be a non-negative number, got {}", threshold);
    }

    let series = load_series(file)?;
    let anomalies = detect_anomalies(&series, threshold);

    if json {
        return print_json(&anomalies);
    }

    println!();
    println!("🔍 Anomalies (z-score ≥ {})", threshold);
    println!("   ─────────────────────────────────────────────────────────────");

    if anomalies.is_empty() {
        println!("   ✅ No unusual months found.");
        return Ok(());
    }

    for anomaly in &anomalies {
        let icon = match anomaly.severity {
            fincast_core::AnomalySeverity::High => "🔴",
            fincast_core::AnomalySeverity::Medium => "🟡",
        };
        println!(
            "   {} {} {:8} {:>12}  z={:.2}",
            icon,
            anomaly.period,
            anomaly.kind.as_str(),
            money(anomaly.value),
            anomaly.z_score
        );
    }

    Ok(())
}

pub fn cmd_report(file: &Path, config: &AnalyticsConfig, json: bool) -> Result<()> {
    let records = load_file(file)?;
    let engine = AnalysisEngine::new(config.clone());
    let report = engine.analyze(&records, &ForecastingSession::from_config(config));

    if json {
        return print_json(&report);
    }

    println!();
    println!("📋 Financial Report");
    println!("   ─────────────────────────────────────────────────────────────");

    if report.buckets.is_empty() {
        println!("   No records found.");
        return Ok(());
    }

    let months = report.buckets.len() as f64;
    let income: f64 = report.buckets.iter().map(|b| b.income).sum();
    let expenses: f64 = report.buckets.iter().map(|b| b.expenses).sum();
    println!("   Months analyzed:   {}", report.buckets.len());
    println!("   Average income:    {}", money(income / months));
    println!("   Average expenses:  {}", money(expenses / months));
    if let Some(trend) = report.expense_trend {
        println!(
            "   Expense trend:     {} ({}/month)",
            trend.direction().as_str(),
            money(trend.slope)
        );
    }
    println!("   Anomalies:         {}", report.anomalies.len());
    for anomaly in &report.anomalies {
        println!(
            "     • {} {} {}",
            anomaly.period,
            anomaly.kind.as_str(),
            money(anomaly.value)
        );
    }

    if let (Some(first), Some(last)) = (report.forecast.first(), report.forecast.last()) {
        println!(
            "   Forecast:          {} to {}, net {} next month",
            first.label,
            last.label,
            money(first.net_predicted)
        );
    }

    if !report.recommendations.is_empty() {
        println!();
        println!("   Recommendations:");
        for rec in &report.recommendations {
            println!("     [{}] {}", rec.kind, rec.title);
        }
    }

    Ok(())
}
