//! Forecast and recommendation commands

use std::path::Path;

use anyhow::Result;
use fincast_core::analytics::{decompose, recommend};
use fincast_core::{AnalyticsConfig, ForecastPoint, ForecastingSession, RecommendationKind};
use serde::Serialize;
use tracing::debug;

use super::{load_series, money, print_json};

#[derive(Serialize)]
struct ForecastOutput {
    session: ForecastingSession,
    points: Vec<ForecastPoint>,
}

pub fn cmd_forecast(
    file: &Path,
    config: &AnalyticsConfig,
    months: Option<usize>,
    retrain: u32,
    json: bool,
) -> Result<()> {
    let mut settings = config.forecast.clone();
    if let Some(months) = months {
        settings.periods_ahead = months;
    }

    let series = load_series(file)?;
    let session = ForecastingSession::from_config(config).retrained_times(retrain);
    debug!(
        retrain,
        confidence = session.confidence(),
        "Forecast session ready"
    );
    let points = session.forecast(&series, &settings);

    if json {
        return print_json(&ForecastOutput { session, points });
    }

    println!();
    println!(
        "🔮 Forecast ({} months, confidence {:.0}%)",
        settings.periods_ahead,
        session.confidence() * 100.0
    );
    if session.retrain_count() > 0 {
        println!("   Retrained {} time(s)", session.retrain_count());
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if points.is_empty() {
        println!("   Need at least 3 months of data to forecast.");
        return Ok(());
    }

    println!(
        "   {:6} │ {:>26} │ {:>26} │ {:>11} │ {:>5}",
        "Month", "Income (range)", "Expenses (range)", "Net", "Conf"
    );
    println!(
        "   ───────┼────────────────────────────┼────────────────────────────┼─────────────┼──────"
    );
    for point in &points {
        println!(
            "   {:6} │ {:>26} │ {:>26} │ {:>11} │ {:>4.0}%",
            point.label,
            format!(
                "{} ({:.0}-{:.0})",
                money(point.income_predicted),
                point.income_lower,
                point.income_upper
            ),
            format!(
                "{} ({:.0}-{:.0})",
                money(point.expenses_predicted),
                point.expenses_lower,
                point.expenses_upper
            ),
            money(point.net_predicted),
            point.confidence * 100.0
        );
    }

    Ok(())
}

pub fn cmd_recommend(file: &Path, config: &AnalyticsConfig, json: bool) -> Result<()> {
    let series = load_series(file)?;
    let seasonal = decompose(&series.expenses, config.decomposition.period);
    let recommendations = recommend(&series, &seasonal, config);

    if json {
        return print_json(&recommendations);
    }

    println!();
    println!("💡 Recommendations");
    println!("   ─────────────────────────────────────────────────────────────");

    if recommendations.is_empty() {
        println!("   Nothing to recommend yet. Add more records.");
        return Ok(());
    }

    for rec in &recommendations {
        let icon = match rec.kind {
            RecommendationKind::Warning => "⚠️ ",
            RecommendationKind::Alert => "🚨",
            RecommendationKind::Success => "✅",
            RecommendationKind::Info => "ℹ️ ",
        };
        println!("   {} {} ({} impact)", icon, rec.title, rec.impact);
        println!("      {}", rec.description);
    }

    Ok(())
}
