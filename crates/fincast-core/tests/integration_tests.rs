//! Integration tests for fincast-core
//!
//! These tests exercise the full load → aggregate → analyze workflow.

use std::io::Write;

use chrono::NaiveDate;
use fincast_core::{
    analytics::{
        aggregate, decompose, detect, fit, forecast::CONFIDENCE_FLOOR, project, recommend,
        MonthlySeries, SpikeSource,
    },
    import::{parse_csv, parse_json},
    load_records, AnalysisEngine, AnalyticsConfig, ForecastingSession, RecommendationDetail,
    RecommendationKind, Record, RecordKind,
};

const SPIKE_EXPENSES: [f64; 12] = [
    500.0, 520.0, 510.0, 530.0, 515.0, 525.0, 540.0, 560.0, 2000.0, 530.0, 520.0, 535.0,
];

/// Helper to create a year of bank-export CSV data for 2024
/// - Paycheck of 3000 on the 1st of every month
/// - Rent plus groceries each month, totalling `SPIKE_EXPENSES`
/// - A transfer each month that must not count as income or expense
fn year_csv() -> String {
    let mut csv = String::from("Date,Description,Amount,Type\n");
    for (i, total) in SPIKE_EXPENSES.iter().enumerate() {
        let month = i + 1;
        csv.push_str(&format!("{:02}/01/2024,PAYCHECK,3000.00,income\n", month));
        csv.push_str(&format!("{:02}/03/2024,RENT,-400.00,expense\n", month));
        csv.push_str(&format!(
            "{:02}/20/2024,GROCERIES,\"-{:.2}\",expense\n",
            month,
            total - 400.0
        ));
        csv.push_str(&format!("{:02}/25/2024,TO SAVINGS,250.00,transfer\n", month));
    }
    csv
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

// =============================================================================
// Pipeline Tests
// =============================================================================

#[test]
fn test_full_import_workflow() {
    let report = parse_csv(year_csv().as_bytes()).expect("Failed to parse CSV");
    assert_eq!(report.skipped, 0);
    assert_eq!(report.records.len(), 48);

    let buckets = aggregate(&report.records);
    assert_eq!(buckets.len(), 12);

    let series = MonthlySeries::from_buckets(buckets.values());
    assert_eq!(series.income, vec![3000.0; 12]);
    for (actual, expected) in series.expenses.iter().zip(SPIKE_EXPENSES) {
        assert!((actual - expected).abs() < 1e-9);
    }
    for i in 0..series.len() {
        assert!((series.net[i] - (series.income[i] - series.expenses[i])).abs() < 1e-9);
    }
    assert_eq!(series.periods[0].to_string(), "2024-01");
    assert_eq!(series.periods[11].to_string(), "2024-12");
}

#[test]
fn test_spending_spike_scenario() {
    let records = parse_csv(year_csv().as_bytes()).unwrap().records;
    let buckets = aggregate(&records);
    let series = MonthlySeries::from_buckets(buckets.values());

    // The 2000 month is the only outlier
    assert_eq!(detect(&series.expenses, 2.0), vec![8]);

    let config = AnalyticsConfig::default();
    let seasonal = decompose(&series.expenses, config.decomposition.period);
    let recs = recommend(&series, &seasonal, &config);

    let spike = recs
        .iter()
        .find(|r| r.kind == RecommendationKind::Alert)
        .expect("Expected a spending spike alert");
    assert_eq!(spike.title, "Spending Spike Detected");
    match &spike.detail {
        RecommendationDetail::SpendingSpike {
            period,
            amount,
            source,
            ..
        } => {
            assert_eq!(period.to_string(), "2024-09");
            assert!((amount - 2000.0).abs() < 1e-9);
            assert_eq!(*source, SpikeSource::Anomaly);
        }
        other => panic!("Unexpected detail: {:?}", other),
    }

    // Income far above expenses also earns the success note
    assert!(recs.iter().any(|r| r.kind == RecommendationKind::Success));
    assert!(!recs.iter().any(|r| r.kind == RecommendationKind::Warning));
}

#[test]
fn test_engine_report() {
    let records = parse_csv(year_csv().as_bytes()).unwrap().records;
    let engine = AnalysisEngine::new(AnalyticsConfig::default());
    let session = ForecastingSession::from_config(engine.config());

    let report = engine.analyze(&records, &session);

    assert_eq!(report.buckets.len(), 12);
    assert_eq!(report.anomalies.len(), 1);
    assert_eq!(report.anomalies[0].kind, RecordKind::Expense);
    assert_eq!(report.anomalies[0].period.to_string(), "2024-09");
    assert_eq!(report.forecast.len(), 6);
    assert_eq!(report.forecast[0].period.to_string(), "2025-01");
    assert_eq!(report.forecast[0].label, "Jan 25");
    assert!(report.income_trend.unwrap().slope.abs() < 1e-9);
    assert!(!report.recommendations.is_empty());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["buckets"][0]["net"], serde_json::json!(2500.0));
    assert_eq!(json["anomalies"][0]["severity"], "high");
}

#[test]
fn test_non_finite_record_does_not_blank_report() {
    let records = parse_csv(year_csv().as_bytes()).unwrap().records;
    let engine = AnalysisEngine::default();
    let session = ForecastingSession::from_config(engine.config());
    let clean = engine.analyze(&records, &session);

    let mut tainted = records.clone();
    tainted.push(Record::new(date(2024, 3, 5), f64::NAN, RecordKind::Expense));
    tainted.push(Record::new(date(2024, 6, 9), f64::INFINITY, RecordKind::Income));
    let report = engine.analyze(&tainted, &session);

    assert_eq!(report.buckets, clean.buckets);
    assert_eq!(report.recommendations, clean.recommendations);
    assert_eq!(report.anomalies, clean.anomalies);
    assert_eq!(report.forecast, clean.forecast);
    assert!(report.expense_trend.is_some());
    assert!(!report.recommendations.is_empty());
}

#[test]
fn test_retraining_raises_forecast_confidence() {
    let records = parse_csv(year_csv().as_bytes()).unwrap().records;
    let engine = AnalysisEngine::default();

    let fresh = engine.analyze(&records, &ForecastingSession::from_config(engine.config()));
    let retrained = engine.analyze(
        &records,
        &ForecastingSession::from_config(engine.config()).retrained(),
    );

    assert!(retrained.confidence > fresh.confidence);
    assert!(retrained.forecast[0].confidence > fresh.forecast[0].confidence);
    // Predictions do not depend on the session
    assert_eq!(
        retrained.forecast[0].expenses_predicted,
        fresh.forecast[0].expenses_predicted
    );
}

// =============================================================================
// Component Property Tests
// =============================================================================

#[test]
fn test_trend_recovers_exact_line() {
    let values: Vec<f64> = (1..=10).map(|x| 3.0 * x as f64 + 7.0).collect();
    let trend = fit(&values).unwrap();

    assert!((trend.slope - 3.0).abs() < 1e-9);
    assert!((trend.intercept - 7.0).abs() < 1e-9);
    assert!((trend.r2.unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn test_anomaly_examples() {
    assert_eq!(detect(&[10.0, 10.0, 10.0, 10.0, 100.0], 2.0), vec![4]);
    assert!(detect(&[42.0; 8], 0.0).is_empty());
    assert!(detect(&[], 2.0).is_empty());
}

#[test]
fn test_seasonal_round_trip() {
    let values: Vec<f64> = (0..36)
        .map(|i| 800.0 + 3.0 * i as f64 + if i % 12 == 11 { 300.0 } else { 0.0 })
        .collect();
    let result = decompose(&values, 12);

    for i in 0..values.len() {
        let rebuilt = result.trend[i] + result.seasonal[i] + result.residual[i];
        assert!((rebuilt - values[i]).abs() < 1e-9);
    }
    assert_eq!(result.peak_phase(), Some(11));
}

#[test]
fn test_forecast_bands_and_confidence() {
    let history = [1000.0, 1100.0, 1200.0, 1300.0];
    let points = project(&history, 12, 0.1, 0.85);

    assert_eq!(points.len(), 12);
    for (k, point) in points.iter().enumerate() {
        assert!(point.lower <= point.predicted && point.predicted <= point.upper);
        assert!(point.confidence >= CONFIDENCE_FLOOR);
        if k > 0 {
            assert!(point.confidence <= points[k - 1].confidence);
        }
    }
    assert!((points[0].predicted - 1400.0).abs() < 1e-6);
    assert_eq!(points[11].confidence, CONFIDENCE_FLOOR);

    assert!(project(&history[..2], 6, 0.1, 0.85).is_empty());
}

#[test]
fn test_degenerate_inputs_do_not_panic() {
    let engine = AnalysisEngine::default();
    let session = ForecastingSession::default();

    let empty = engine.analyze(&[], &session);
    assert!(empty.buckets.is_empty());
    assert!(empty.forecast.is_empty());
    assert!(empty.recommendations.is_empty());

    let single = engine.analyze(
        &[Record::new(date(2024, 4, 2), 100.0, RecordKind::Expense)],
        &session,
    );
    assert_eq!(single.buckets.len(), 1);
    assert!(single.expense_trend.is_none());
    assert!(single.forecast.is_empty());
    // Zero income leaves the savings-rate rules silent
    assert!(single
        .recommendations
        .iter()
        .all(|r| r.kind != RecommendationKind::Warning && r.kind != RecommendationKind::Success));
}

// =============================================================================
// File Loading Tests
// =============================================================================

#[test]
fn test_load_csv_and_json_files() {
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("2024.csv");
    std::fs::write(&csv_path, year_csv()).unwrap();
    let from_csv = load_records(&csv_path).unwrap();
    assert_eq!(from_csv.records.len(), 48);

    let json_path = dir.path().join("2024.json");
    let mut file = std::fs::File::create(&json_path).unwrap();
    serde_json::to_writer(&mut file, &from_csv.records).unwrap();
    file.flush().unwrap();

    let from_json = load_records(&json_path).unwrap();
    assert_eq!(from_json.records, from_csv.records);
}

#[test]
fn test_json_with_bad_rows() {
    let json = r#"[
        {"date": "2024-01-05", "amount": 2500, "type": "income"},
        {"date": "2024-01-06", "amount": "NaN", "type": "expense"},
        {"date": "2024-01-07", "amount": 80, "type": "expense"}
    ]"#;
    let report = parse_json(json.as_bytes()).unwrap();
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.skipped, 1);
}
