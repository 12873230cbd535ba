//! Trend-based forecasting with variance bands and decaying confidence

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aggregate::MonthlySeries;
use super::trend::fit;
use crate::config::ForecastSettings;
use crate::models::PeriodKey;

/// Minimum history length before any forecast is produced
pub const MIN_HISTORY: usize = 3;
/// Confidence lost per projected period
pub const CONFIDENCE_STEP: f64 = 0.05;
/// Confidence never drops below this
pub const CONFIDENCE_FLOOR: f64 = 0.6;

/// Confidence for the `step`-th projected period (1-indexed)
pub fn confidence_at(base_confidence: f64, step: usize) -> f64 {
    (base_confidence.min(1.0) - CONFIDENCE_STEP * step as f64).max(CONFIDENCE_FLOOR)
}

/// One projected value of a single series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Periods after the last observation (1-indexed)
    pub step: usize,
    pub predicted: f64,
    pub lower: f64,
    pub upper: f64,
    pub confidence: f64,
}

/// Extend the least-squares trend of `history` by `periods_ahead` periods
///
/// Histories shorter than [`MIN_HISTORY`] produce no projections. The band is
/// `predicted ± |predicted| * variance_ratio`, so `lower <= upper` even when
/// the trend runs negative.
pub fn project(
    history: &[f64],
    periods_ahead: usize,
    variance_ratio: f64,
    base_confidence: f64,
) -> Vec<Projection> {
    if history.len() < MIN_HISTORY {
        return Vec::new();
    }
    let Some(trend) = fit(history) else {
        return Vec::new();
    };

    let n = history.len();
    (1..=periods_ahead)
        .map(|step| {
            let predicted = trend.predict((n + step) as f64);
            let band = predicted.abs() * variance_ratio;
            Projection {
                step,
                predicted,
                lower: predicted - band,
                upper: predicted + band,
                confidence: confidence_at(base_confidence, step),
            }
        })
        .collect()
}

/// Income and expense projections for one future month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub period: PeriodKey,
    pub label: String,
    pub expenses_predicted: f64,
    pub expenses_lower: f64,
    pub expenses_upper: f64,
    pub income_predicted: f64,
    pub income_lower: f64,
    pub income_upper: f64,
    pub net_predicted: f64,
    pub confidence: f64,
}

/// Project income and expenses on the same monthly grid and merge them
///
/// Forecast months follow the last observed month.
pub fn forecast(
    series: &MonthlySeries,
    settings: &ForecastSettings,
    base_confidence: f64,
) -> Vec<ForecastPoint> {
    let Some(last) = series.last_period() else {
        return Vec::new();
    };

    let expenses = project(
        &series.expenses,
        settings.periods_ahead,
        settings.variance_ratio,
        base_confidence,
    );
    let income = project(
        &series.income,
        settings.periods_ahead,
        settings.variance_ratio,
        base_confidence,
    );

    let points: Vec<ForecastPoint> = expenses
        .iter()
        .zip(&income)
        .map(|(e, i)| {
            let period = last.advance(e.step);
            ForecastPoint {
                period,
                label: period.short_label(),
                expenses_predicted: e.predicted,
                expenses_lower: e.lower,
                expenses_upper: e.upper,
                income_predicted: i.predicted,
                income_lower: i.lower,
                income_upper: i.upper,
                net_predicted: i.predicted - e.predicted,
                confidence: e.confidence,
            }
        })
        .collect();

    debug!(
        history = series.len(),
        points = points.len(),
        base_confidence,
        "Forecast generated"
    );
    points
}
