//! Seasonal decomposition: moving-average trend, per-phase seasonal pattern,
//! and residuals

use serde::{Deserialize, Serialize};

/// Default cycle length for monthly data
pub const DEFAULT_PERIOD: usize = 12;

/// Additive decomposition `value = trend + seasonal + residual`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonalResult {
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
    /// One average deviation per phase `0..period`
    pub seasonal_pattern: Vec<f64>,
}

impl SeasonalResult {
    pub fn period(&self) -> usize {
        self.seasonal_pattern.len()
    }

    /// First phase holding the largest pattern entry
    pub fn peak_phase(&self) -> Option<usize> {
        let mut peak: Option<(usize, f64)> = None;
        for (phase, &value) in self.seasonal_pattern.iter().enumerate() {
            match peak {
                Some((_, best)) if value <= best => {}
                _ => peak = Some((phase, value)),
            }
        }
        peak.map(|(phase, _)| phase)
    }
}

/// Decompose `values` with a cycle of `period` points
///
/// The trend is a centered moving average of width `period`. Points without a
/// full window on both sides keep their raw value as the trend, so a series
/// shorter than one full cycle has an all-zero seasonal component. A period
/// of zero is treated as one.
pub fn decompose(values: &[f64], period: usize) -> SeasonalResult {
    let period = period.max(1);
    let n = values.len();
    let before = period / 2;
    let after = period - before;

    let trend: Vec<f64> = (0..n)
        .map(|i| {
            if i >= before && i + after < n {
                let window = &values[i - before..i + after];
                window.iter().sum::<f64>() / period as f64
            } else {
                values[i]
            }
        })
        .collect();

    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (i, (value, trend)) in values.iter().zip(&trend).enumerate() {
        sums[i % period] += value - trend;
        counts[i % period] += 1;
    }

    let seasonal_pattern: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(&sum, &count)| if count > 0 { sum / count as f64 } else { 0.0 })
        .collect();

    let seasonal: Vec<f64> = (0..n).map(|i| seasonal_pattern[i % period]).collect();

    let residual: Vec<f64> = values
        .iter()
        .zip(trend.iter().zip(&seasonal))
        .map(|(value, (trend, seasonal))| value - trend - seasonal)
        .collect();

    SeasonalResult {
        trend,
        seasonal,
        residual,
        seasonal_pattern,
    }
}
