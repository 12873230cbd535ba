//! Linear trend fitting (ordinary least squares)

use serde::{Deserialize, Serialize};

use super::stats::{is_constant, safe_div};

/// Fitted line `y = slope * x + intercept` over x = 1..=n
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination; None when it is mathematically undefined
    pub r2: Option<f64>,
}

/// Direction of a fitted trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Rising,
    Falling,
    Flat,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::Falling => "falling",
            Self::Flat => "flat",
        }
    }
}

impl TrendResult {
    /// Value of the fitted line at 1-indexed position `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn direction(&self) -> TrendDirection {
        const FLAT_SLOPE: f64 = 1e-9;
        if self.slope > FLAT_SLOPE {
            TrendDirection::Rising
        } else if self.slope < -FLAT_SLOPE {
            TrendDirection::Falling
        } else {
            TrendDirection::Flat
        }
    }
}

/// Fit a least-squares line, pairing `values[i]` with x = i + 1
///
/// Returns None for fewer than two points. A constant series fits exactly
/// (slope 0, r2 1).
pub fn fit(values: &[f64]) -> Option<TrendResult> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    if is_constant(values) {
        return Some(TrendResult {
            slope: 0.0,
            intercept: values[0],
            r2: Some(1.0),
        });
    }

    let nf = n as f64;
    let sum_x = nf * (nf + 1.0) / 2.0;
    let sum_x2 = nf * (nf + 1.0) * (2.0 * nf + 1.0) / 6.0;
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values
        .iter()
        .enumerate()
        .map(|(i, y)| (i + 1) as f64 * y)
        .sum();

    // Denominator is n²(n²-1)/12, non-zero for n >= 2
    let slope = safe_div(nf * sum_xy - sum_x * sum_y, nf * sum_x2 - sum_x * sum_x)?;
    let intercept = (sum_y - slope * sum_x) / nf;

    let y_mean = sum_y / nf;
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (i, y) in values.iter().enumerate() {
        let predicted = slope * (i + 1) as f64 + intercept;
        ss_res += (y - predicted).powi(2);
        ss_tot += (y - y_mean).powi(2);
    }

    let r2 = match safe_div(ss_res, ss_tot) {
        Some(ratio) => Some(1.0 - ratio),
        None if ss_res == 0.0 => Some(1.0),
        None => None,
    };

    Some(TrendResult {
        slope,
        intercept,
        r2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_perfectly_linear() {
        let trend = fit(&[10.0, 20.0, 30.0, 40.0]).unwrap();
        assert!((trend.slope - 10.0).abs() < EPS);
        assert!(trend.intercept.abs() < EPS);
        assert!((trend.r2.unwrap() - 1.0).abs() < EPS);
        assert_eq!(trend.direction(), TrendDirection::Rising);
        assert!((trend.predict(5.0) - 50.0).abs() < EPS);
    }

    #[test]
    fn test_constant_series_has_defined_r2() {
        let trend = fit(&[5.0, 5.0, 5.0, 5.0]).unwrap();
        assert_eq!(trend.slope, 0.0);
        assert_eq!(trend.intercept, 5.0);
        let r2 = trend.r2.unwrap();
        assert!(!r2.is_nan());
        assert_eq!(r2, 1.0);
        assert_eq!(trend.direction(), TrendDirection::Flat);
    }

    #[test]
    fn test_constant_non_integer_series() {
        let trend = fit(&[0.1, 0.1, 0.1]).unwrap();
        assert_eq!(trend.slope, 0.0);
        assert_eq!(trend.r2, Some(1.0));
    }

    #[test]
    fn test_insufficient_points() {
        assert!(fit(&[]).is_none());
        assert!(fit(&[42.0]).is_none());
        assert!(fit(&[1.0, 3.0]).is_some());
    }

    #[test]
    fn test_noisy_fit() {
        // y = 2x + 1 with alternating noise
        let values = [3.5, 4.5, 7.5, 8.5, 11.5, 12.5];
        let trend = fit(&values).unwrap();
        assert!(trend.slope > 1.5 && trend.slope < 2.5);
        let r2 = trend.r2.unwrap();
        assert!(r2 > 0.9 && r2 < 1.0);
    }

    #[test]
    fn test_falling_trend() {
        let trend = fit(&[900.0, 800.0, 700.0]).unwrap();
        assert!((trend.slope + 100.0).abs() < EPS);
        assert!((trend.intercept - 1000.0).abs() < EPS);
        assert_eq!(trend.direction(), TrendDirection::Falling);
    }
}
