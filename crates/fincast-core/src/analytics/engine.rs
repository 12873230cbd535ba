//! Analysis engine - runs the full pipeline over a record set

use serde::Serialize;
use tracing::{debug, info};

use super::aggregate::MonthlySeries;
use super::anomaly::{detect_anomalies, Anomaly};
use super::forecast::ForecastPoint;
use super::recommend::RecommendationEngine;
use super::seasonal::{decompose, SeasonalResult};
use super::session::ForecastingSession;
use super::trend::{fit, TrendResult};
use super::types::Recommendation;
use crate::config::AnalyticsConfig;
use crate::models::{PeriodBucket, Record};

/// Everything derived from one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub buckets: Vec<PeriodBucket>,
    /// None with fewer than two months
    pub expense_trend: Option<TrendResult>,
    pub income_trend: Option<TrendResult>,
    /// Decomposition of monthly expenses
    pub seasonal: SeasonalResult,
    pub anomalies: Vec<Anomaly>,
    pub forecast: Vec<ForecastPoint>,
    pub recommendations: Vec<Recommendation>,
    /// Session confidence the forecast started from
    pub confidence: f64,
}

/// Runs aggregation, trend fitting, decomposition, anomaly detection,
/// forecasting and recommendations with one configuration
pub struct AnalysisEngine {
    config: AnalyticsConfig,
    recommendations: RecommendationEngine,
}

impl AnalysisEngine {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self {
            config,
            recommendations: RecommendationEngine::new(),
        }
    }

    /// Use a custom rule set
    pub fn with_rules(config: AnalyticsConfig, recommendations: RecommendationEngine) -> Self {
        Self {
            config,
            recommendations,
        }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Analyze raw records
    pub fn analyze(&self, records: &[Record], session: &ForecastingSession) -> AnalysisReport {
        let series = MonthlySeries::from_records(records);
        self.analyze_series(&series, session)
    }

    /// Analyze already-aggregated monthly data
    pub fn analyze_series(
        &self,
        series: &MonthlySeries,
        session: &ForecastingSession,
    ) -> AnalysisReport {
        let expense_trend = fit(&series.expenses);
        let income_trend = fit(&series.income);
        debug!(
            months = series.len(),
            expense_slope = expense_trend.map(|t| t.slope),
            income_slope = income_trend.map(|t| t.slope),
            "Trend fit complete"
        );

        let seasonal = decompose(&series.expenses, self.config.decomposition.period);
        let anomalies = detect_anomalies(series, self.config.anomaly.threshold);
        debug!(count = anomalies.len(), "Anomaly detection complete");

        let forecast = session.forecast(series, &self.config.forecast);
        let recommendations = self
            .recommendations
            .recommend(series, &seasonal, &self.config);

        info!(
            months = series.len(),
            anomalies = anomalies.len(),
            forecast_points = forecast.len(),
            recommendations = recommendations.len(),
            "Analysis complete"
        );

        AnalysisReport {
            buckets: series.buckets(),
            expense_trend,
            income_trend,
            seasonal,
            anomalies,
            forecast,
            recommendations,
            confidence: session.confidence(),
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new(AnalyticsConfig::default())
    }
}
