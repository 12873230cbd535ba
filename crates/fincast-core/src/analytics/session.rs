//! Forecasting session state
//!
//! The session is a plain value: forecasts read it, and retraining returns a
//! new session instead of mutating the old one.

use serde::{Deserialize, Serialize};

use super::aggregate::MonthlySeries;
use super::forecast::{forecast, ForecastPoint};
use crate::config::{AnalyticsConfig, ForecastSettings};

/// Confidence gained per retrain
pub const RETRAIN_STEP: f64 = 0.05;
/// Retraining never raises confidence past this
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Rolling model-quality state carried between forecast runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastingSession {
    confidence: f64,
    retrain_count: u32,
}

impl ForecastingSession {
    pub fn new(base_confidence: f64) -> Self {
        Self {
            confidence: base_confidence.clamp(0.0, 1.0),
            retrain_count: 0,
        }
    }

    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self::new(config.forecast.base_confidence)
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn retrain_count(&self) -> u32 {
        self.retrain_count
    }

    /// Session after one retrain: confidence nudged up by [`RETRAIN_STEP`],
    /// capped at [`MAX_CONFIDENCE`], and never lowered
    pub fn retrained(self) -> Self {
        let raised = (self.confidence + RETRAIN_STEP).min(MAX_CONFIDENCE);
        Self {
            confidence: raised.max(self.confidence),
            retrain_count: self.retrain_count + 1,
        }
    }

    /// Apply `times` retrains in sequence
    pub fn retrained_times(self, times: u32) -> Self {
        (0..times).fold(self, |session, _| session.retrained())
    }

    /// Forecast `series` starting from this session's confidence
    pub fn forecast(&self, series: &MonthlySeries, settings: &ForecastSettings) -> Vec<ForecastPoint> {
        forecast(series, settings, self.confidence)
    }
}

impl Default for ForecastingSession {
    fn default() -> Self {
        Self::from_config(&AnalyticsConfig::default())
    }
}
