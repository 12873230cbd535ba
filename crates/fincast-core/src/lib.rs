//! Fincast Core Library
//!
//! Forecasting and anomaly detection over monthly income and expenses:
//! - CSV and JSON record loading
//! - Monthly aggregation into period buckets
//! - Least-squares trends and seasonal decomposition
//! - z-score anomaly detection
//! - Trend-based forecasts with confidence bands
//! - Rule-based recommendations
//! - TOML configuration with embedded defaults

pub mod analytics;
pub mod config;
pub mod error;
pub mod import;
pub mod models;

/// Record fixtures shared by unit and CLI tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analytics::{
    AnalysisEngine, AnalysisReport, Anomaly, AnomalySeverity, ForecastPoint, ForecastingSession,
    Impact, MonthlySeries, Recommendation, RecommendationDetail, RecommendationEngine,
    RecommendationKind, SeasonalResult, TrendResult,
};
pub use config::AnalyticsConfig;
pub use error::{Error, Result};
pub use import::{load_records, ImportReport};
pub use models::{PeriodBucket, PeriodKey, Record, RecordKind};
