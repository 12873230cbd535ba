//! Shared numeric helpers
//!
//! Every ratio in the analytics pipeline (savings rate, z-score, R²) goes
//! through [`safe_div`] so that a zero denominator becomes `None` instead of
//! NaN or infinity leaking into results.

/// Divide, returning None for a zero denominator or a non-finite quotient
pub fn safe_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let quotient = numerator / denominator;
    quotient.is_finite().then_some(quotient)
}

/// Arithmetic mean; None for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    safe_div(values.iter().sum(), values.len() as f64)
}

/// Population standard deviation (divides by n); None for an empty slice
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    safe_div(sum_sq, values.len() as f64).map(f64::sqrt)
}

/// True when every value equals the first (vacuously true for empty input)
///
/// Checked directly rather than through a computed variance, which can come
/// out as a tiny non-zero number for constant non-integer series.
pub fn is_constant(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => true,
    }
}
