//! Rule-based recommendations
//!
//! Rules are evaluated in registration order, so the output order is stable:
//! low savings rate, spending spike, excellent savings rate, seasonal peak.

use tracing::debug;

use super::aggregate::MonthlySeries;
use super::anomaly::detect;
use super::seasonal::SeasonalResult;
use super::stats::{mean, safe_div};
use super::types::{Recommendation, RecommendationDetail, SpikeSource};
use crate::config::{AnalyticsConfig, RecommendationSettings};

/// Identifier of a built-in rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleId {
    LowSavingsRate,
    SpendingSpike,
    ExcellentSavingsRate,
    SeasonalPeak,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowSavingsRate => "low_savings_rate",
            Self::SpendingSpike => "spending_spike",
            Self::ExcellentSavingsRate => "excellent_savings_rate",
            Self::SeasonalPeak => "seasonal_peak",
        }
    }
}

/// Everything a rule may look at, computed once per evaluation
pub struct RuleContext<'a> {
    pub series: &'a MonthlySeries,
    pub seasonal: &'a SeasonalResult,
    pub settings: &'a RecommendationSettings,
    pub avg_income: f64,
    pub avg_expenses: f64,
    /// Percent of income kept; None when average income is zero
    pub savings_rate: Option<f64>,
    /// Expense months flagged by the anomaly detector
    pub expense_anomalies: Vec<usize>,
}

impl<'a> RuleContext<'a> {
    /// Returns None for an empty series
    pub fn new(
        series: &'a MonthlySeries,
        seasonal: &'a SeasonalResult,
        config: &'a AnalyticsConfig,
    ) -> Option<Self> {
        let avg_income = mean(&series.income)?;
        let avg_expenses = mean(&series.expenses)?;
        let savings_rate = safe_div(avg_income - avg_expenses, avg_income).map(|r| r * 100.0);

        Some(Self {
            series,
            seasonal,
            settings: &config.recommendations,
            avg_income,
            avg_expenses,
            savings_rate,
            expense_anomalies: detect(&series.expenses, config.anomaly.threshold),
        })
    }
}

/// A single recommendation rule
pub trait RecommendationRule: Send + Sync {
    fn id(&self) -> RuleId;

    /// Produce at most one recommendation
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation>;
}

/// Warn when the savings rate falls below the configured floor
pub struct LowSavingsRateRule;

impl RecommendationRule for LowSavingsRateRule {
    fn id(&self) -> RuleId {
        RuleId::LowSavingsRate
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let savings_rate = ctx.savings_rate?;
        (savings_rate < ctx.settings.low_savings_rate)
            .then(|| RecommendationDetail::LowSavingsRate { savings_rate }.into())
    }
}

/// Alert on an expense month well above average
///
/// Checks the most recent months against `spike_ratio × average` first. If
/// none qualifies, falls back to the most recent above-average month the
/// anomaly detector flagged.
pub struct SpendingSpikeRule;

impl RecommendationRule for SpendingSpikeRule {
    fn id(&self) -> RuleId {
        RuleId::SpendingSpike
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let expenses = &ctx.series.expenses;
        let limit = ctx.avg_expenses * ctx.settings.spike_ratio;
        let window_start = expenses.len().saturating_sub(ctx.settings.spike_window);

        let recent = (window_start..expenses.len())
            .filter(|&i| expenses[i] > limit)
            .max_by(|&a, &b| expenses[a].total_cmp(&expenses[b]))
            .map(|i| (i, SpikeSource::RecentMonths));

        let flagged = || {
            ctx.expense_anomalies
                .iter()
                .rev()
                .copied()
                .find(|&i| expenses[i] > ctx.avg_expenses)
                .map(|i| (i, SpikeSource::Anomaly))
        };

        let (index, source) = recent.or_else(flagged)?;
        Some(
            RecommendationDetail::SpendingSpike {
                period: ctx.series.periods[index],
                amount: expenses[index],
                average: ctx.avg_expenses,
                spike_ratio: ctx.settings.spike_ratio,
                source,
            }
            .into(),
        )
    }
}

/// Celebrate a savings rate above the configured target
pub struct ExcellentSavingsRateRule;

impl RecommendationRule for ExcellentSavingsRateRule {
    fn id(&self) -> RuleId {
        RuleId::ExcellentSavingsRate
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let savings_rate = ctx.savings_rate?;
        (savings_rate > ctx.settings.excellent_savings_rate)
            .then(|| RecommendationDetail::ExcellentSavingsRate { savings_rate }.into())
    }
}

/// Name the month where spending peaks within the seasonal cycle
pub struct SeasonalPeakRule;

impl RecommendationRule for SeasonalPeakRule {
    fn id(&self) -> RuleId {
        RuleId::SeasonalPeak
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let phase = ctx.seasonal.peak_phase()?;
        let period = ctx.series.phase_period(phase)?;

        Some(
            RecommendationDetail::SeasonalPeak {
                period,
                phase,
                deviation: ctx.seasonal.seasonal_pattern[phase],
            }
            .into(),
        )
    }
}

/// Evaluates registered rules in order
pub struct RecommendationEngine {
    rules: Vec<Box<dyn RecommendationRule>>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationEngine {
    /// Create an engine with the built-in rules
    pub fn new() -> Self {
        let mut engine = Self { rules: vec![] };

        engine.register(Box::new(LowSavingsRateRule));
        engine.register(Box::new(SpendingSpikeRule));
        engine.register(Box::new(ExcellentSavingsRateRule));
        engine.register(Box::new(SeasonalPeakRule));

        engine
    }

    /// Append a rule; it runs after every rule registered before it
    pub fn register(&mut self, rule: Box<dyn RecommendationRule>) {
        self.rules.push(rule);
    }

    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Run every rule over the series and its decomposition
    ///
    /// An empty series yields no recommendations. With zero average income
    /// the savings-rate rules stay silent.
    pub fn recommend(
        &self,
        series: &MonthlySeries,
        seasonal: &SeasonalResult,
        config: &AnalyticsConfig,
    ) -> Vec<Recommendation> {
        let Some(ctx) = RuleContext::new(series, seasonal, config) else {
            debug!("No monthly data, skipping recommendations");
            return Vec::new();
        };

        if ctx.savings_rate.is_none() {
            debug!("Average income is zero, savings rate undefined");
        }

        let mut recommendations = Vec::new();
        for rule in &self.rules {
            if let Some(rec) = rule.evaluate(&ctx) {
                debug!(rule = rule.id().as_str(), kind = rec.kind.as_str(), "Rule fired");
                recommendations.push(rec);
            }
        }
        recommendations
    }
}

/// Run the built-in rules
pub fn recommend(
    series: &MonthlySeries,
    seasonal: &SeasonalResult,
    config: &AnalyticsConfig,
) -> Vec<Recommendation> {
    RecommendationEngine::new().recommend(series, seasonal, config)
}
