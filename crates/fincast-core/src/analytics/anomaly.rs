//! Z-score anomaly detection

use serde::{Deserialize, Serialize};

use super::aggregate::MonthlySeries;
use super::stats::{is_constant, mean, population_std_dev, safe_div};
use super::types::AnomalySeverity;
use crate::models::{PeriodKey, RecordKind};

/// Default z-score cutoff
pub const DEFAULT_THRESHOLD: f64 = 2.0;

/// Absolute z-score of every value against the population mean and standard
/// deviation
///
/// Returns None when the scores are undefined: empty input or a constant
/// series (zero standard deviation).
pub fn z_scores(values: &[f64]) -> Option<Vec<f64>> {
    if is_constant(values) {
        return None;
    }
    let mean = mean(values)?;
    let std_dev = population_std_dev(values)?;
    values
        .iter()
        .map(|v| safe_div((v - mean).abs(), std_dev))
        .collect()
}

/// Indices (ascending) whose z-score reaches `threshold`
///
/// A constant or empty series never produces anomalies.
pub fn detect(values: &[f64], threshold: f64) -> Vec<usize> {
    let Some(scores) = z_scores(values) else {
        return Vec::new();
    };
    scores
        .iter()
        .enumerate()
        .filter(|&(_, &z)| z >= threshold)
        .map(|(i, _)| i)
        .collect()
}

/// A month whose income or expenses stand out from the rest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub period: PeriodKey,
    pub value: f64,
    pub kind: RecordKind,
    pub severity: AnomalySeverity,
    pub z_score: f64,
}

/// Flag unusual expense months (high severity) followed by unusual income
/// months (medium severity)
pub fn detect_anomalies(series: &MonthlySeries, threshold: f64) -> Vec<Anomaly> {
    let mut anomalies = flag_series(
        series,
        &series.expenses,
        threshold,
        RecordKind::Expense,
        AnomalySeverity::High,
    );
    anomalies.extend(flag_series(
        series,
        &series.income,
        threshold,
        RecordKind::Income,
        AnomalySeverity::Medium,
    ));
    anomalies
}

fn flag_series(
    series: &MonthlySeries,
    values: &[f64],
    threshold: f64,
    kind: RecordKind,
    severity: AnomalySeverity,
) -> Vec<Anomaly> {
    let Some(scores) = z_scores(values) else {
        return Vec::new();
    };
    detect(values, threshold)
        .into_iter()
        .map(|i| Anomaly {
            period: series.periods[i],
            value: values[i],
            kind,
            severity,
            z_score: scores[i],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::series;

    #[test]
    fn test_single_outlier_flagged() {
        let flagged = detect(&[10.0, 10.0, 10.0, 10.0, 100.0], 2.0);
        assert_eq!(flagged, vec![4]);
    }

    #[test]
    fn test_constant_series_never_flags() {
        for threshold in [0.0, 0.5, 2.0, 10.0] {
            assert!(detect(&[7.0; 6], threshold).is_empty());
            assert!(detect(&[0.1, 0.1, 0.1], threshold).is_empty());
        }
        assert!(z_scores(&[3.0, 3.0]).is_none());
    }

    #[test]
    fn test_empty_and_single() {
        assert!(detect(&[], 2.0).is_empty());
        assert!(detect(&[42.0], 0.0).is_empty());
    }

    #[test]
    fn test_z_scores_use_population_std_dev() {
        // mean 5, population std dev 2
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let scores = z_scores(&values).unwrap();
        assert!((scores[0] - 1.5).abs() < 1e-12);
        assert!((scores[7] - 2.0).abs() < 1e-12);
        assert_eq!(detect(&values, 2.0), vec![7]);
        assert_eq!(detect(&values, 1.5), vec![0, 7]);
    }

    #[test]
    fn test_detect_anomalies_labels_both_series() {
        let series = series(
            &[3000.0; 6],
            &[500.0, 520.0, 510.0, 530.0, 515.0, 2000.0],
        );

        let anomalies = detect_anomalies(&series, 2.0);
        assert_eq!(anomalies.len(), 1);
        let spike = &anomalies[0];
        assert_eq!(spike.period.to_string(), "2024-06");
        assert_eq!(spike.value, 2000.0);
        assert_eq!(spike.kind, RecordKind::Expense);
        assert_eq!(spike.severity, AnomalySeverity::High);
        assert!(spike.z_score >= 2.0);
    }
}
