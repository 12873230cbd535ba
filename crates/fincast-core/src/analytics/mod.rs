//! Analytics - Trends, Seasonality, Anomalies and Forecasts
//!
//! Pure, synchronous transforms over monthly income/expense data. Nothing in
//! this module does I/O or keeps state between calls; the only carried state
//! is the [`ForecastingSession`] value the caller passes in.
//!
//! ## Pipeline
//!
//! - **Aggregate** - records into monthly buckets ([`aggregate`])
//! - **Trend** - least-squares line over a series ([`fit`])
//! - **Seasonal** - moving-average decomposition ([`decompose`])
//! - **Anomaly** - z-score outlier flags ([`detect`])
//! - **Forecast** - trend projection with bands and decaying confidence
//! - **Recommend** - rule-based advice over the above
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fincast_core::analytics::{AnalysisEngine, ForecastingSession};
//!
//! let engine = AnalysisEngine::new(config);
//! let report = engine.analyze(&records, &ForecastingSession::from_config(engine.config()));
//! ```
//!
//! Insufficient or degenerate input never errors: trends need two points,
//! forecasts three, and constant series produce no anomalies.

pub mod aggregate;
pub mod anomaly;
pub mod engine;
pub mod forecast;
pub mod recommend;
pub mod seasonal;
pub mod session;
pub mod stats;
pub mod trend;
pub mod types;

pub use aggregate::{aggregate, MonthlySeries};
pub use anomaly::{detect, detect_anomalies, z_scores, Anomaly};
pub use engine::{AnalysisEngine, AnalysisReport};
pub use forecast::{forecast, project, ForecastPoint, Projection};
pub use recommend::{recommend, RecommendationEngine, RecommendationRule, RuleContext, RuleId};
pub use seasonal::{decompose, SeasonalResult};
pub use session::ForecastingSession;
pub use stats::safe_div;
pub use trend::{fit, TrendDirection, TrendResult};
pub use types::{
    AnomalySeverity, Impact, Recommendation, RecommendationDetail, RecommendationKind, SpikeSource,
};
