//! Analytics configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/fincast/config/analytics.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from a file keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analytics::{anomaly::DEFAULT_THRESHOLD, seasonal::DEFAULT_PERIOD};
use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analytics.toml");

/// Seasonal decomposition settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecompositionSettings {
    /// Seasonal cycle length in monthly buckets
    pub period: usize,
}

impl Default for DecompositionSettings {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
        }
    }
}

/// Anomaly detection settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalySettings {
    /// z-score cutoff
    pub threshold: f64,
}

impl Default for AnomalySettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Forecast settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSettings {
    /// Months to project forward
    pub periods_ahead: usize,
    /// Band half-width as a fraction of the predicted value
    pub variance_ratio: f64,
    /// Starting confidence before any retraining
    pub base_confidence: f64,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            periods_ahead: 6,
            variance_ratio: 0.1,
            base_confidence: 0.85,
        }
    }
}

/// Recommendation rule thresholds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationSettings {
    /// Savings rate (percent) below which a warning is raised
    pub low_savings_rate: f64,
    /// Savings rate (percent) above which a success note is raised
    pub excellent_savings_rate: f64,
    /// Multiple of average expenses that counts as a spike
    pub spike_ratio: f64,
    /// Number of most recent months checked for spikes
    pub spike_window: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            low_savings_rate: 10.0,
            excellent_savings_rate: 20.0,
            spike_ratio: 1.2,
            spike_window: 3,
        }
    }
}

/// Complete analytics configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalyticsConfig {
    pub decomposition: DecompositionSettings,
    pub anomaly: AnomalySettings,
    pub forecast: ForecastSettings,
    pub recommendations: RecommendationSettings,
}

impl AnalyticsConfig {
    /// Load from an explicit path, the data-dir override, or the embedded
    /// defaults (first one found wins)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let path = match override_path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => default_config_path().filter(|p| p.exists()),
        };

        let content = match &path {
            Some(path) => {
                debug!(path = %path.display(), "Loading analytics config");
                fs::read_to_string(path)
                    .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
            }
            None => DEFAULT_CONFIG.to_string(),
        };

        Self::parse(&content)
    }

    /// Parse config from TOML content, then validate it
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();

        if let Some(decomposition) = raw.decomposition {
            if let Some(period) = decomposition.period {
                config.decomposition.period = period;
            }
        }

        if let Some(anomaly) = raw.anomaly {
            if let Some(threshold) = anomaly.threshold {
                config.anomaly.threshold = threshold;
            }
        }

        if let Some(forecast) = raw.forecast {
            if let Some(periods) = forecast.periods_ahead {
                config.forecast.periods_ahead = periods;
            }
            if let Some(ratio) = forecast.variance_ratio {
                config.forecast.variance_ratio = ratio;
            }
            if let Some(confidence) = forecast.base_confidence {
                config.forecast.base_confidence = confidence;
            }
        }

        if let Some(rules) = raw.recommendations {
            if let Some(rate) = rules.low_savings_rate {
                config.recommendations.low_savings_rate = rate;
            }
            if let Some(rate) = rules.excellent_savings_rate {
                config.recommendations.excellent_savings_rate = rate;
            }
            if let Some(ratio) = rules.spike_ratio {
                config.recommendations.spike_ratio = ratio;
            }
            if let Some(window) = rules.spike_window {
                config.recommendations.spike_window = window;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values the analytics cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.decomposition.period == 0 {
            return Err(Error::Config("decomposition.period must be at least 1".into()));
        }
        if !self.anomaly.threshold.is_finite() || self.anomaly.threshold < 0.0 {
            return Err(Error::Config(format!(
                "anomaly.threshold must be a non-negative number, got {}",
                self.anomaly.threshold
            )));
        }
        if !self.forecast.variance_ratio.is_finite() || self.forecast.variance_ratio < 0.0 {
            return Err(Error::Config(format!(
                "forecast.variance_ratio must be a non-negative number, got {}",
                self.forecast.variance_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.forecast.base_confidence) {
            return Err(Error::Config(format!(
                "forecast.base_confidence must be between 0 and 1, got {}",
                self.forecast.base_confidence
            )));
        }
        if self.recommendations.spike_ratio <= 0.0 || !self.recommendations.spike_ratio.is_finite()
        {
            return Err(Error::Config(format!(
                "recommendations.spike_ratio must be positive, got {}",
                self.recommendations.spike_ratio
            )));
        }
        if self.recommendations.low_savings_rate > self.recommendations.excellent_savings_rate {
            return Err(Error::Config(
                "recommendations.low_savings_rate must not exceed excellent_savings_rate".into(),
            ));
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("fincast").join("config").join("analytics.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    decomposition: Option<RawDecomposition>,
    anomaly: Option<RawAnomaly>,
    forecast: Option<RawForecast>,
    recommendations: Option<RawRecommendations>,
}

#[derive(Debug, Deserialize)]
struct RawDecomposition {
    period: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawAnomaly {
    threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    periods_ahead: Option<usize>,
    variance_ratio: Option<f64>,
    base_confidence: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawRecommendations {
    low_savings_rate: Option<f64>,
    excellent_savings_rate: Option<f64>,
    spike_ratio: Option<f64>,
    spike_window: Option<usize>,
}
